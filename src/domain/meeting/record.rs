//! Archived meeting records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cost::MILLIS_PER_HOUR;
use crate::domain::timing::CompletedMeeting;

/// Store-assigned meeting identifier
pub type MeetingId = i64;

/// A completed meeting that has not been archived yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeetingRecord {
    pub name: String,
    /// Creation time of the record
    pub date: DateTime<Utc>,
    pub attendee_names: Vec<String>,
    pub average_hourly_rate: f64,
    pub duration_milliseconds: u64,
    pub total_cost: f64,
    pub started_at: i64,
    pub ended_at: i64,
}

impl NewMeetingRecord {
    /// Build the archive record for a stopped meeting.
    /// The record date is the end time at millisecond precision.
    pub fn from_completed(done: &CompletedMeeting) -> Self {
        Self {
            name: done.config.name().to_string(),
            date: DateTime::from_timestamp_millis(done.ended_at).unwrap_or_default(),
            attendee_names: done.config.attendee_names().to_vec(),
            average_hourly_rate: done.config.average_hourly_rate(),
            duration_milliseconds: done.elapsed_ms,
            total_cost: done.total_cost,
            started_at: done.started_at,
            ended_at: done.ended_at,
        }
    }

    /// Attach the id assigned by the archive
    pub fn with_id(self, id: MeetingId) -> MeetingRecord {
        MeetingRecord {
            id,
            name: self.name,
            date: self.date,
            attendee_names: self.attendee_names,
            average_hourly_rate: self.average_hourly_rate,
            duration_milliseconds: self.duration_milliseconds,
            total_cost: self.total_cost,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }
}

/// An archived meeting. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: MeetingId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub attendee_names: Vec<String>,
    pub average_hourly_rate: f64,
    pub duration_milliseconds: u64,
    pub total_cost: f64,
    pub started_at: i64,
    pub ended_at: i64,
}

impl MeetingRecord {
    pub fn attendee_count(&self) -> usize {
        self.attendee_names.len()
    }

    /// Cost recomputed from attendees, rate and duration
    pub fn expected_cost(&self) -> f64 {
        self.attendee_count() as f64
            * self.average_hourly_rate
            * (self.duration_milliseconds as f64 / MILLIS_PER_HOUR)
    }
}
