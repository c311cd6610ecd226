//! Elapsed time value object

use std::fmt;

/// Display refresh cadence for a running meeting (100ms)
pub const TICK_INTERVAL_MS: u64 = 100;

/// Value object representing elapsed meeting time.
/// Displays as `HH:MM:SS.cc` (centiseconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed {
    milliseconds: u64,
}

impl Elapsed {
    /// Create an Elapsed from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Get elapsed time in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centis = (self.milliseconds % 1000) / 10;
        let total_secs = self.as_secs();
        let seconds = total_secs % 60;
        let minutes = (total_secs / 60) % 60;
        let hours = total_secs / 3600;

        write!(f, "{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
    }
}

/// Format a millisecond count as `HH:MM:SS.cc`.
///
/// Hours keep counting past 99 and are never truncated.
pub fn format_duration(ms: u64) -> String {
    Elapsed::from_millis(ms).to_string()
}
