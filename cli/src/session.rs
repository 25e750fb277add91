use ragdoll::ChatMessage;

use crate::state::Feature;

pub const APOLOGY: &str = "Sorry, I encountered an error processing your message.";

/// Client-side chat state: an append-only conversation log plus the
/// transient buffer a streamed reply accumulates into. The buffer is not
/// part of the log; it becomes an assistant turn only once the stream
/// closes cleanly.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Vec<ChatMessage>,
    draft: String,
    feature: Feature<()>,
}

impl ChatSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conversation: Vec::new(),
            draft: String::new(),
            feature: Feature::new(),
        }
    }

    /// Starts an exchange. The user's turn is appended to the log
    /// immediately and is never rolled back, even if the exchange fails.
    /// Returns the trimmed query, or `None` for a blank or duplicate
    /// submission.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let query = self.feature.submit(input)?;

        self.conversation.push(ChatMessage::user(query.clone()));
        self.draft.clear();

        Some(query)
    }

    /// Applies one streamed fragment in arrival order and returns the
    /// accumulated text so far.
    pub fn push_fragment(&mut self, fragment: &str) -> &str {
        self.draft.push_str(fragment);
        &self.draft
    }

    /// Ends the exchange, promoting the accumulated buffer to a finalized
    /// assistant turn.
    pub fn finish(&mut self) {
        let reply = std::mem::take(&mut self.draft);

        self.conversation.push(ChatMessage::assistant(reply));
        self.feature.succeed(());
    }

    /// Ends the exchange after a failure: the partial buffer is discarded
    /// and a fixed apology becomes the assistant's turn instead.
    pub fn abort(&mut self) {
        self.draft.clear();
        self.conversation.push(ChatMessage::assistant(APOLOGY));
        self.feature.fail(APOLOGY);
    }

    /// Conversation history to send with the next exchange. Excludes the
    /// turn appended by the in-flight submission.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        match self.conversation.split_last() {
            Some((last, rest)) if self.feature.is_loading() && last.role == ragdoll::Role::User => {
                rest
            }
            _ => &self.conversation,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.conversation
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }
}
