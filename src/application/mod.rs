//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnnouncementSource, DraftingSettings, ExportProposalHandler, GenerateProposalCommand,
    GenerateProposalHandler, GenerateProposalResult, ListModelsHandler, ListModelsQuery,
    ProgressSink, ProposalError, ReviseSectionCommand, ReviseSectionHandler,
};
