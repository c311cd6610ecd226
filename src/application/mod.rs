//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod configure;
pub mod ports;
pub mod session;

// Re-export use cases
pub use configure::{
    AttendeeRequest, ConfigureError, ConfigureMeetingUseCase, ConfigureRequest,
    ConfiguredMeeting,
};
pub use session::{
    ArchivedMeeting, SessionError, SessionEvent, SessionOrchestrator, SnapshotCallback,
};
