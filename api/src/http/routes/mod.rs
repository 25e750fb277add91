use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::env;

mod chat;
mod query;

use crate::axum::state::AppState;

pub fn mount() -> Router<AppState> {
    Router::new()
        .merge(query::mount())
        .merge(chat::mount())
        .route("/", get(index))
        .route("/version", get(version))
}

#[allow(clippy::unused_async)]
async fn index() -> Json<Value> {
    Json(json!({ "name": "Ragdoll" }))
}

#[derive(serde::Serialize)]
struct ApiVersion {
    semver: String,
    rev: Option<String>,
    compile_time: String,
}

#[allow(clippy::unused_async)]
async fn version() -> Json<ApiVersion> {
    Json(ApiVersion {
        rev: env::var("GIT_REV").ok(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        compile_time: env!("STATIC_BUILD_DATE").to_string(),
    })
}
