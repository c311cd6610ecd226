//! WasteWatch - live meeting cost timer
//!
//! This crate times meetings, shows what they cost as they run, and keeps
//! an archive of finished meetings in SQLite.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Cost math, the meeting timer, attendee normalization, records and errors
//! - **Application**: Use cases (configure, session) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (SQLite archive, TOML preferences, logging)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
