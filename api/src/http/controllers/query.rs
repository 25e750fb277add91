use axum::extract::{Query, State};
use axum_jsonschema::Json;
use tracing::error;

use crate::axum::{
    errors::{ApiError, ApiResult},
    state::AppState,
};
use ragdoll::SearchResult;

#[derive(Debug, serde::Deserialize)]
pub struct QueryParams {
    q: Option<String>,
    target: Option<String>,
}

fn require(param: Option<String>, error: ApiError) -> ApiResult<String> {
    param.filter(|value| !value.is_empty()).ok_or(error)
}

/// Searches the target partition and passes the provider's result through
/// unmodified: the synthesised answer plus the ranked source documents.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<SearchResult>> {
    let query = require(params.q, ApiError::MissingQuery)?;
    let target = require(params.target, ApiError::MissingTarget)?;

    let result = ragdoll::search(&state.rag, &query, &target)
        .await
        .map_err(|err| {
            error!("AutoRAG query failed: {err:#}");
            ApiError::QueryFailed
        })?;

    Ok(Json(result))
}

#[derive(Debug, serde::Serialize)]
pub struct GeneratedAnswer {
    text: String,
}

/// Answers the query from documents retrieved out of the target partition.
/// Zero retrieved documents short-circuit to a fixed no-data message.
pub async fn generate(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<GeneratedAnswer>> {
    let query = require(params.q, ApiError::MissingQuery)?;
    let target = require(params.target, ApiError::MissingTarget)?;

    let text = ragdoll::generate_answer(&state.rag, &state.openai, &query, &target)
        .await
        .map_err(|err| {
            error!("AutoRAG query failed: {err:#}");
            ApiError::QueryFailed
        })?;

    Ok(Json(GeneratedAnswer { text }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use ragdoll::{AutoRag, OpenAI};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{axum::state, http::routes};

    fn app(rag_url: &str, openai_url: &str) -> Router {
        routes::mount().with_state(Arc::new(state::State {
            rag: AutoRag::from_url(rag_url),
            openai: OpenAI::with_api_base(openai_url),
        }))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn result_page(response: Option<&str>, data: Vec<Value>) -> Value {
        json!({
            "object": "vector_store.search_results.page",
            "search_query": "rewritten query",
            "response": response,
            "data": data,
            "has_more": false,
            "next_page": null,
        })
    }

    #[tokio::test]
    async fn missing_query_is_rejected() {
        let (status, body) = get(app("http://unused", "http://unused"), "/query?target=HoloMeet_Pro").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Query parameter is required" }));
    }

    #[tokio::test]
    async fn missing_target_is_rejected() {
        let (status, body) = get(app("http://unused", "http://unused"), "/query?q=hello").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Target parameter is required" }));
    }

    #[tokio::test]
    async fn empty_parameters_count_as_missing() {
        let (status, body) = get(
            app("http://unused", "http://unused"),
            "/openai_query?q=hello&target=",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Target parameter is required" }));
    }

    #[tokio::test]
    async fn search_results_pass_through_unmodified() {
        let server = MockServer::start().await;
        let page = result_page(
            Some("answer"),
            vec![json!({
                "file_id": "file-1",
                "filename": "setup.md",
                "score": 0.5,
                "attributes": {},
                "content": [{ "type": "text", "text": "alpha" }],
            })],
        );

        Mock::given(method("POST"))
            .and(path("/ai-search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(
            app(&server.uri(), "http://unused"),
            "/query?q=hello&target=HoloMeet_Pro",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn provider_failures_are_masked() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ai-search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = get(
            app(&server.uri(), "http://unused"),
            "/query?q=hello&target=HoloMeet_Pro",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to process query" }));
    }

    #[tokio::test]
    async fn empty_retrieval_answers_with_the_no_data_message() {
        let rag_server = MockServer::start().await;
        let openai_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(result_page(None, vec![])))
            .expect(1)
            .mount(&rag_server)
            .await;

        let (status, body) = get(
            app(&rag_server.uri(), &openai_server.uri()),
            "/openai_query?q=hello&target=NeuroNote_X",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": "No data found for query \"hello\"" }));
        assert!(openai_server.received_requests().await.unwrap().is_empty());
    }
}
