//! HTTP adapters - REST API implementations.

pub mod proposal;

pub use proposal::{proposal_router, ProposalAppState};

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Full application router: every endpoint plus request tracing, CORS and the
/// upload size limit.
pub fn app_router(state: ProposalAppState, server: &ServerConfig) -> Router {
    proposal_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Configured origins only; any origin when none are configured outside
/// production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
