//! Meeting session orchestration

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::meeting::{MeetingConfig, MeetingId, MeetingRecord, NewMeetingRecord};
use crate::domain::timing::{Clock, InvalidStateTransition, MeetingTimer, TimerSnapshot, TimerState};

use super::ports::{ArchiveStore, StoreError};

/// Errors from the session orchestrator
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A meeting is already {0}. End it before starting another")]
    AlreadyActive(TimerState),

    #[error("No meeting in progress")]
    NoActiveSession,

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Meeting ended but was not archived: {source}")]
    Archive {
        /// The unsaved record, kept so the caller can retry
        record: Box<NewMeetingRecord>,
        #[source]
        source: StoreError,
    },
}

/// What caused a snapshot to be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused,
    Resumed,
    Tick,
    Ended,
}

/// Listener for snapshots, called on every tick and transition
pub type SnapshotCallback = Arc<dyn Fn(SessionEvent, TimerSnapshot) + Send + Sync>;

/// A meeting that was ended and stored
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedMeeting {
    pub id: MeetingId,
    pub record: MeetingRecord,
}

/// Composition root for one meeting at a time: drives the timer and
/// archives the record when the meeting ends.
pub struct SessionOrchestrator<A>
where
    A: ArchiveStore,
{
    archive: A,
    timer: MeetingTimer,
    on_snapshot: Option<SnapshotCallback>,
}

impl<A> SessionOrchestrator<A>
where
    A: ArchiveStore,
{
    /// Create an idle orchestrator
    pub fn new(archive: A, clock: Arc<dyn Clock>) -> Self {
        Self {
            archive,
            timer: MeetingTimer::new(clock),
            on_snapshot: None,
        }
    }

    /// Register a snapshot listener
    pub fn with_listener(mut self, listener: SnapshotCallback) -> Self {
        self.on_snapshot = Some(listener);
        self
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn config(&self) -> Option<&MeetingConfig> {
        self.timer.config()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Configure a new meeting and start timing it.
    /// Rejected while another meeting is running or paused.
    pub fn begin_session(&mut self, config: MeetingConfig) -> Result<TimerSnapshot, SessionError> {
        let state = self.timer.state();
        if state.is_active() {
            return Err(SessionError::AlreadyActive(state));
        }

        info!(
            meeting = config.name(),
            attendees = config.attendee_count(),
            rate = config.average_hourly_rate(),
            "meeting started"
        );
        self.timer.configure(config)?;
        Ok(self.emit(SessionEvent::Started))
    }

    /// Resume a paused meeting; a no-op in any other state
    pub fn start(&mut self) -> TimerSnapshot {
        match self.timer.start() {
            Ok(()) => {
                debug!("meeting resumed");
                self.emit(SessionEvent::Resumed)
            }
            Err(e) => {
                warn!("{}", e);
                self.timer.snapshot()
            }
        }
    }

    /// Pause a running meeting; a no-op in any other state
    pub fn pause(&mut self) -> TimerSnapshot {
        match self.timer.pause() {
            Ok(()) => {
                debug!("meeting paused");
                self.emit(SessionEvent::Paused)
            }
            Err(e) => {
                warn!("{}", e);
                self.timer.snapshot()
            }
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle(&mut self) -> TimerSnapshot {
        match self.timer.state() {
            TimerState::Paused => self.start(),
            _ => self.pause(),
        }
    }

    /// Refresh elapsed time; emits only while running
    pub fn tick(&mut self) -> Option<TimerSnapshot> {
        let snapshot = self.timer.tick()?;
        if let Some(listener) = &self.on_snapshot {
            listener(SessionEvent::Tick, snapshot);
        }
        Some(snapshot)
    }

    /// Stop the meeting, reset the timer and archive the record.
    ///
    /// The timer is back to idle before the insert runs, so a failed insert
    /// never revives the meeting; the unsaved record is returned in
    /// `SessionError::Archive` for an explicit retry.
    pub async fn end_session(&mut self) -> Result<ArchivedMeeting, SessionError> {
        let done = match self.timer.stop() {
            Ok(done) => done,
            Err(e) => {
                warn!("{}", e);
                return Err(SessionError::NoActiveSession);
            }
        };
        let record = NewMeetingRecord::from_completed(&done);

        self.timer.reset()?;
        if let Some(listener) = &self.on_snapshot {
            listener(
                SessionEvent::Ended,
                TimerSnapshot {
                    elapsed_ms: done.elapsed_ms,
                    cost: done.total_cost,
                },
            );
        }

        self.archive_record(record).await
    }

    /// Insert a record that previously failed to archive
    pub async fn retry_archive(
        &self,
        record: NewMeetingRecord,
    ) -> Result<ArchivedMeeting, SessionError> {
        self.archive_record(record).await
    }

    async fn archive_record(&self, record: NewMeetingRecord) -> Result<ArchivedMeeting, SessionError> {
        match self.archive.insert(record.clone()).await {
            Ok(id) => {
                info!(id, cost = record.total_cost, "meeting archived");
                Ok(ArchivedMeeting {
                    id,
                    record: record.with_id(id),
                })
            }
            Err(source) => {
                warn!("failed to archive meeting: {}", source);
                Err(SessionError::Archive {
                    record: Box::new(record),
                    source,
                })
            }
        }
    }

    fn emit(&self, event: SessionEvent) -> TimerSnapshot {
        let snapshot = self.timer.snapshot();
        if let Some(listener) = &self.on_snapshot {
            listener(event, snapshot);
        }
        snapshot
    }
}
