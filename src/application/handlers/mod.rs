//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod proposal;

pub use proposal::{
    AnnouncementSource, DraftingSettings, ExportProposalHandler, GenerateProposalCommand,
    GenerateProposalHandler, GenerateProposalResult, ListModelsHandler, ListModelsQuery,
    ProgressSink, ProposalError, ReviseSectionCommand, ReviseSectionHandler,
};
