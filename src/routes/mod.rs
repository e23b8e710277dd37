//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the ladder API and a health check under one Axum router. API routes
//! accept POST only; Axum answers other verbs with `405` and an `Allow`
//! header. The `/main` paths are the ones the browser client has always
//! called and stay as aliases.

pub mod ladder;

use axum::Router;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/generate", post(ladder::generate))
        .route("/api/generate/main", post(ladder::generate))
        .route("/api/trace", post(ladder::trace))
        .route("/api/trace/main", post(ladder::trace))
        .route("/api/trace/all", post(ladder::trace_all))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
