//! HTTP adapter for drafting sessions.

mod dto;
mod error;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionResponse, DraftView, ErrorResponse, FragmentEvent, ModelsResponse,
    ReviseSectionRequest, SectionView,
};
pub use error::ProposalApiError;
pub use handlers::ProposalAppState;
pub use routes::proposal_router;
