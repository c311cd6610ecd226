//! Meeting configuration and archive records

pub mod config;
pub mod record;
pub mod summary;

pub use config::{validate_rate, MeetingConfig};
pub use record::{MeetingId, MeetingRecord, NewMeetingRecord};
pub use summary::{ArchiveSummary, TrendPoint};
