//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the main application runners.

pub mod app;
pub mod archive_cmd;
pub mod args;
pub mod prefs_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    run_archive_command, run_meeting, run_prefs_command, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{ArchiveAction, Cli, Commands, PrefsAction, StartArgs};
pub use presenter::Presenter;
