use std::sync::Arc;

use anyhow::Result;
use async_openai::{
    types::{ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs, Role},
    Client,
};

use crate::prompt::SYSTEM_PROMPT;

const COMPLETION_MODEL: &str = "gpt-4o-mini";

pub struct OpenAI {
    client: Arc<Client>,
}

impl OpenAI {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Arc::new(Client::new()),
        }
    }

    /// Points the client at an API-compatible completion endpoint.
    #[must_use]
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            client: Arc::new(Client::new().with_api_base(api_base)),
        }
    }

    /// Prompts the completion model to answer `query` from the provided
    /// file context. The context and the raw query are sent as separate
    /// user turns.
    ///
    /// # Errors
    ///
    /// Returns an error if the Completions API call fails.
    pub async fn answer(&self, context: &str, query: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(COMPLETION_MODEL)
            .messages([
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::System)
                    .content(SYSTEM_PROMPT)
                    .build()?,
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::User)
                    .content(context)
                    .build()?,
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::User)
                    .content(query)
                    .build()?,
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        Ok(response
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("Could not find completion"))?
            .message
            .content
            .clone())
    }
}

impl Clone for OpenAI {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl Default for OpenAI {
    fn default() -> Self {
        Self::new()
    }
}
