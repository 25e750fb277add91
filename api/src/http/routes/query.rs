use axum::{routing::get, Router};

use crate::{axum::state::AppState, http::controllers::QueryController};

pub fn mount() -> Router<AppState> {
    Router::new()
        .route("/query", get(QueryController::search))
        .route("/openai_query", get(QueryController::generate))
}
