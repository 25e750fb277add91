use anyhow::Result;
use futures::StreamExt;
use ragdoll::{ChatMessage, SearchResult};
use reqwest::Client;
use serde_json::json;

/// HTTP client for the query/chat gateway.
pub struct Gateway {
    client: Client,
    base_url: String,
}

impl Gateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Searches a target partition, returning the synthesised answer and
    /// ranked sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway responds with a non-2xx status or
    /// an undecodable body.
    pub async fn search(&self, query: &str, target: &str) -> Result<SearchResult> {
        let result = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[("q", query), ("target", target)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(result)
    }

    /// Asks for a generated answer over a target partition.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway responds with a non-2xx status or
    /// an undecodable body.
    pub async fn answer(&self, query: &str, target: &str) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct AnswerResponse {
            text: String,
        }

        let response: AnswerResponse = self
            .client
            .get(format!("{}/openai_query", self.base_url))
            .query(&[("q", query), ("target", target)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.text)
    }

    /// Opens a chat exchange and hands each decoded fragment to
    /// `on_fragment` in arrival order, returning once the stream closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request or the stream
    /// is cut short by a transport failure.
    pub async fn chat(
        &self,
        query: &str,
        messages: &[ChatMessage],
        mut on_fragment: impl FnMut(&str),
    ) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&json!({ "query": query, "messages": messages }))
            .send()
            .await?
            .error_for_status()?;

        let mut fragments = response.bytes_stream();
        while let Some(chunk) = fragments.next().await {
            on_fragment(&String::from_utf8_lossy(&chunk?));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn chat_fragments_concatenate_to_the_full_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(serde_json::json!({ "query": "hi", "messages": [] })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello"))
            .mount(&server)
            .await;

        let gateway = Gateway::new(server.uri());
        let mut transcript = String::new();

        gateway
            .chat("hi", &[], |fragment| transcript.push_str(fragment))
            .await
            .unwrap();

        assert_eq!(transcript, "Hello");
    }

    #[tokio::test]
    async fn rejected_chats_fail_before_any_fragment_is_seen() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gateway = Gateway::new(server.uri());
        let mut saw_fragment = false;

        let result = gateway.chat("hi", &[], |_| saw_fragment = true).await;

        assert!(result.is_err());
        assert!(!saw_fragment);
    }
}
