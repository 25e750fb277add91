use axum::{routing::post, Router};

use crate::{axum::state::AppState, http::controllers::ChatController};

pub fn mount() -> Router<AppState> {
    Router::new().route("/chat", post(ChatController::stream))
}
