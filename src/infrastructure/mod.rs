//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with SQLite, the filesystem and the tracing subscriber.

pub mod archive;
pub mod logging;
pub mod preferences;

// Re-export adapters
pub use archive::SqliteArchiveStore;
pub use logging::init_logging;
pub use preferences::XdgPreferenceStore;
