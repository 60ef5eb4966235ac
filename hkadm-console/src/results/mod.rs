//! Podium and preselection publication

mod coordinator;
mod document;
mod public_view;

pub use coordinator::{PreselectionsDocument, ResultsCoordinator, ResultsState};
pub use document::{DocumentUpload, MAX_DOCUMENT_BYTES, PDF_CONTENT_TYPE};
pub use public_view::{PodiumEntry, PublicResults};
