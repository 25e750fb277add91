use axum::Router;
use std::env;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{axum::state, http::routes};

const REQUIRED_ENV_VARS: &[&str] = &["AUTORAG_URL", "OPENAI_API_KEY"];

pub fn create() -> Router {
    for var in REQUIRED_ENV_VARS {
        assert!(env::var(var).is_ok(), "${var} not set");
    }

    routes::mount()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state::create())
}
