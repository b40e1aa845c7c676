//! Temporary upload storage
//!
//! Uploaded files are written to a local directory under collision-free
//! names and removed once the import that acquired them is done.

mod guard;
mod local;
mod types;

pub use guard::ScopedUpload;
pub use local::UploadStore;
pub use types::UploadedFile;
