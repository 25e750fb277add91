#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod autorag;
mod message;
pub mod openai;
mod prompt;
pub mod stream;

pub use autorag::{AutoRag, ContentBlock, Filter, SearchRequest, SearchResult, SourceDocument};
pub use message::{ChatMessage, Role};
pub use openai::OpenAI;
pub use prompt::{
    build_context_query, build_file_context, no_data_message, CONTEXT_WINDOW, SYSTEM_PROMPT,
};

use anyhow::Result;

/// Searches a target partition, returning the ranked sources together with
/// the provider's synthesised answer.
///
/// # Errors
///
/// Returns an error if the retrieval service call fails.
pub async fn search(rag: &AutoRag, query: &str, target: &str) -> Result<SearchResult> {
    rag.ai_search(&SearchRequest::new(query).restrict_to(target))
        .await
}

/// Answers a question from documents retrieved out of a target partition.
///
/// When retrieval comes back empty, the fixed no-data message is returned
/// without issuing a completion call.
///
/// # Errors
///
/// Returns an error if the retrieval or completion service call fails.
pub async fn generate_answer(
    rag: &AutoRag,
    openai: &OpenAI,
    query: &str,
    target: &str,
) -> Result<String> {
    let result = rag
        .search(&SearchRequest::new(query).restrict_to(target))
        .await?;

    if result.data.is_empty() {
        return Ok(no_data_message(query));
    }

    openai
        .answer(&build_file_context(&result.data), query)
        .await
}
