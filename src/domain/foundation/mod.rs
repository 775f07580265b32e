//! Foundation module - Shared domain primitives.
//!
//! Identifiers and validation errors used across the proposal domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::SessionId;
