//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod attendees;
pub mod cost;
pub mod error;
pub mod meeting;
pub mod preferences;
pub mod timing;

// Re-export common types
pub use attendees::{AttendeeInput, InputMode, RoleGroup, RoleGroupSpec, RoleRateMemory};
pub use error::*;
pub use meeting::{ArchiveSummary, MeetingConfig, MeetingId, MeetingRecord, NewMeetingRecord};
pub use preferences::{PreferenceKey, Preferences};
pub use timing::{Clock, MeetingTimer, TimerSnapshot, TimerState};
