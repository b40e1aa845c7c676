//! Domain models for the procurement directory
//!
//! Entity kinds accepted by the import pipeline and the typed drafts produced
//! for each of them before they are handed to storage.

pub mod documents;
pub mod entity;

pub use documents::{
    CandidateDocument, ContactDraft, ProductDraft, SchoolDraft, VendorDraft,
};
pub use entity::EntityKind;
