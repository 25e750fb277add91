use std::sync::Arc;

use ragdoll::{AutoRag, OpenAI};

/// Provider clients shared across requests. Both are cheap to clone and
/// hold no per-request state.
#[derive(Clone)]
pub struct State {
    pub rag: AutoRag,
    pub openai: OpenAI,
}

#[allow(clippy::module_name_repetitions)]
pub type AppState = Arc<State>;

pub fn create() -> AppState {
    Arc::new(State {
        rag: AutoRag::new(),
        openai: OpenAI::new(),
    })
}
