//! Proposal drafting handlers.
//!
//! Each handler performs one user action against a draft passed in by the
//! caller. Handlers never hold on to the draft and never look sessions up;
//! the caller owns the session and its exclusivity.

mod completion;
mod errors;
mod export_proposal;
mod generate_proposal;
mod list_models;
mod progress;
mod revise_section;
mod settings;
pub mod testing;

pub use errors::ProposalError;
pub use export_proposal::ExportProposalHandler;
pub use generate_proposal::{
    AnnouncementSource, GenerateProposalCommand, GenerateProposalHandler, GenerateProposalResult,
};
pub use list_models::{ListModelsHandler, ListModelsQuery};
pub use progress::{ChannelProgress, NoProgress, ProgressSink, RecordingProgress};
pub use revise_section::{ReviseSectionCommand, ReviseSectionHandler};
pub use settings::DraftingSettings;
