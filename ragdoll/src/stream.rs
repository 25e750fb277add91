use async_fn_stream::try_fn_stream;
use futures::Stream;

use crate::{autorag::SearchRequest, prompt::build_context_query, AutoRag, ChatMessage};

/// Streams the assistant's reply to a chat exchange as text fragments.
///
/// Fragments arrive in the order they must be concatenated. The current
/// provider answers in a single piece, so the stream carries one fragment;
/// a failed exchange ends the stream without emitting any.
pub fn ask(
    rag: AutoRag,
    query: String,
    messages: Vec<ChatMessage>,
) -> impl Stream<Item = std::result::Result<String, anyhow::Error>> {
    try_fn_stream(|emitter| async move {
        let contextual = build_context_query(&query, &messages);
        let result = rag.ai_search(&SearchRequest::new(contextual)).await?;

        if let Some(response) = result.response {
            if !response.is_empty() {
                emitter.emit(response).await;
            }
        }

        Ok(())
    })
}
