//! Route configuration for drafting endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_session, delete_session, export_proposal, generate_proposal, get_session, health,
    list_models, revise_section, ProposalAppState,
};

/// Creates the proposal router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness check
/// - `POST /api/sessions` - Start a session
/// - `GET /api/sessions/:id` - Current draft
/// - `DELETE /api/sessions/:id` - End a session
/// - `POST /api/providers/:provider/models` - Validate a key and list models
/// - `POST /api/sessions/:id/generate` - Draft a proposal (`?stream=true` for SSE)
/// - `POST /api/sessions/:id/sections/:index/revise` - Revise one section (`?stream=true` for SSE)
/// - `GET /api/sessions/:id/export` - Download `proposal.md`
pub fn proposal_router() -> Router<ProposalAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/providers/:provider/models", post(list_models))
        .route("/api/sessions/:id/generate", post(generate_proposal))
        .route("/api/sessions/:id/sections/:index/revise", post(revise_section))
        .route("/api/sessions/:id/export", get(export_proposal))
}
