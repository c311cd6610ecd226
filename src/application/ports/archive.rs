//! Meeting archive port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::meeting::{MeetingId, MeetingRecord, NewMeetingRecord};

/// Archive storage errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Meeting archive unavailable: {0}")]
    Unavailable(String),

    #[error("Meeting {0} not found")]
    NotFound(MeetingId),

    #[error("Archive query failed: {0}")]
    QueryFailed(String),

    #[error("Archived meeting {id} is unreadable: {message}")]
    Corrupt { id: MeetingId, message: String },
}

/// Port for the durable meeting archive.
///
/// Each call completes (or fails) on its own; callers await one call
/// before issuing a dependent one.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Insert a record and return the id assigned to it.
    /// Ids are never reused.
    async fn insert(&self, record: NewMeetingRecord) -> Result<MeetingId, StoreError>;

    /// All records, most recently ended first
    async fn list_all(&self) -> Result<Vec<MeetingRecord>, StoreError>;

    /// One record by id, or `StoreError::NotFound`
    async fn get(&self, id: MeetingId) -> Result<MeetingRecord, StoreError>;

    /// Remove every record and return how many were removed.
    /// Irreversible; confirmation is the caller's job.
    async fn clear_all(&self) -> Result<u64, StoreError>;
}
