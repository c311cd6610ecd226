//! Active meeting configuration

use serde::{Deserialize, Serialize};

use crate::domain::cost;
use crate::domain::error::ValidationError;

/// Canonical meeting configuration produced by the attendee normalizer.
///
/// The attendee count is always the length of `attendee_names`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingConfig {
    name: String,
    average_hourly_rate: f64,
    attendee_names: Vec<String>,
}

impl MeetingConfig {
    /// Build a configuration, rejecting an empty attendee list or a
    /// negative/non-finite rate.
    pub fn new(
        name: impl Into<String>,
        average_hourly_rate: f64,
        attendee_names: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if attendee_names.is_empty() {
            return Err(ValidationError::NoAttendees);
        }
        validate_rate(average_hourly_rate)?;

        Ok(Self {
            name: name.into(),
            average_hourly_rate,
            attendee_names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn average_hourly_rate(&self) -> f64 {
        self.average_hourly_rate
    }

    pub fn attendee_names(&self) -> &[String] {
        &self.attendee_names
    }

    pub fn attendee_count(&self) -> usize {
        self.attendee_names.len()
    }

    /// Combined hourly cost of every attendee
    pub fn burn_rate(&self) -> f64 {
        self.attendee_count() as f64 * self.average_hourly_rate
    }

    /// Cost accrued after `elapsed_ms` of meeting time
    pub fn cost_at(&self, elapsed_ms: u64) -> f64 {
        cost::cost(elapsed_ms, self.attendee_count(), self.average_hourly_rate)
    }
}

/// Reject negative or non-finite hourly rates
pub fn validate_rate(rate: f64) -> Result<(), ValidationError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ValidationError::InvalidRate(rate.to_string()));
    }
    Ok(())
}
