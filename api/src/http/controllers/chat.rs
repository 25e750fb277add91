use std::convert::Infallible;

use axum::{body::StreamBody, extract::State, http::header, response::IntoResponse};
use axum_jsonschema::Json;
use schemars::JsonSchema;
use tokio_stream::StreamExt;
use tracing::error;

use crate::axum::{
    errors::{ApiError, ApiResult},
    state::AppState,
};
use ragdoll::{stream::ask, ChatMessage};

#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct ChatRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

/// Streams the assistant's reply as a chunked plain-text body. A failed
/// exchange closes the stream without writing a byte; clients treat an
/// empty stream as an error.
#[allow(clippy::unused_async)]
pub async fn stream(
    State(state): State<AppState>,
    Json(ChatRequest { query, messages }): Json<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    let fragments = ask(state.rag.clone(), query, messages).filter_map(|fragment| match fragment {
        Ok(text) => Some(Ok::<_, Infallible>(text)),
        Err(err) => {
            error!("AutoRAG chat failed: {err:#}");
            None
        }
    });

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        StreamBody::new(fragments),
    ))
}
