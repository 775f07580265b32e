//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, validation errors)
//! - `proposal` - Proposal draft, section splitting, and generation requests

pub mod foundation;
pub mod proposal;
