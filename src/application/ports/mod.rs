//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod archive;
pub mod preferences;

// Re-export common types
pub use archive::{ArchiveStore, StoreError};
pub use preferences::PreferenceStore;
