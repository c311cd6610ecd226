//! Meeting timer state machine

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::meeting::MeetingConfig;

use super::clock::Clock;

/// Timer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Ended,
}

impl TimerState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }

    /// Whether a meeting is in progress (running or paused)
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: TimerState,
    pub action: String,
}

/// Point-in-time view of the timer for display
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSnapshot {
    pub elapsed_ms: u64,
    pub cost: f64,
}

/// Final figures of a stopped meeting
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMeeting {
    pub config: MeetingConfig,
    pub elapsed_ms: u64,
    pub total_cost: f64,
    /// Epoch ms when the meeting was configured
    pub started_at: i64,
    /// Epoch ms when the meeting was stopped
    pub ended_at: i64,
}

/// Meeting timer.
/// Elapsed time is always derived from the clock and a start reference,
/// never accumulated from tick deltas.
///
/// State machine:
///   IDLE | ENDED -> RUNNING (configure)
///   RUNNING -> PAUSED (pause)
///   PAUSED -> RUNNING (start)
///   RUNNING | PAUSED -> ENDED (stop)
///   ENDED -> IDLE (reset)
pub struct MeetingTimer {
    clock: Arc<dyn Clock>,
    state: TimerState,
    config: Option<MeetingConfig>,
    /// Epoch ms such that `now - start_reference` is the elapsed time while running
    start_reference: i64,
    elapsed_ms: u64,
    started_at: i64,
}

impl MeetingTimer {
    /// Create a new idle timer
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            config: None,
            start_reference: 0,
            elapsed_ms: 0,
            started_at: 0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Active configuration, if any
    pub fn config(&self) -> Option<&MeetingConfig> {
        self.config.as_ref()
    }

    /// Install a configuration and start running from zero.
    /// Allowed from IDLE or ENDED.
    pub fn configure(&mut self, config: MeetingConfig) -> Result<(), InvalidStateTransition> {
        if self.state.is_active() {
            return Err(self.invalid("configure a meeting"));
        }
        let now = self.clock.now_millis();
        self.config = Some(config);
        self.elapsed_ms = 0;
        self.start_reference = now;
        self.started_at = now;
        self.state = TimerState::Running;
        Ok(())
    }

    /// Transition from PAUSED to RUNNING, keeping elapsed time continuous
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != TimerState::Paused {
            return Err(self.invalid("start"));
        }
        self.start_reference = self.clock.now_millis() - self.elapsed_ms as i64;
        self.state = TimerState::Running;
        Ok(())
    }

    /// Transition from RUNNING to PAUSED, freezing elapsed time
    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != TimerState::Running {
            return Err(self.invalid("pause"));
        }
        self.elapsed_ms = self.running_elapsed();
        self.state = TimerState::Paused;
        Ok(())
    }

    /// Transition from RUNNING or PAUSED to ENDED
    pub fn stop(&mut self) -> Result<CompletedMeeting, InvalidStateTransition> {
        if !self.state.is_active() {
            return Err(self.invalid("stop"));
        }
        let config = match self.config.clone() {
            Some(config) => config,
            None => return Err(self.invalid("stop")),
        };

        let ended_at = self.clock.now_millis();
        if self.state == TimerState::Running {
            self.elapsed_ms = self.running_elapsed();
        }
        self.state = TimerState::Ended;

        Ok(CompletedMeeting {
            total_cost: config.cost_at(self.elapsed_ms),
            config,
            elapsed_ms: self.elapsed_ms,
            started_at: self.started_at,
            ended_at: ended_at.max(self.started_at),
        })
    }

    /// Transition from ENDED to IDLE, dropping the configuration
    pub fn reset(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != TimerState::Ended {
            return Err(self.invalid("reset"));
        }
        self.config = None;
        self.elapsed_ms = 0;
        self.start_reference = 0;
        self.started_at = 0;
        self.state = TimerState::Idle;
        Ok(())
    }

    /// Recompute elapsed time while running.
    /// Returns `None` in every other state.
    pub fn tick(&mut self) -> Option<TimerSnapshot> {
        if self.state != TimerState::Running {
            return None;
        }
        self.elapsed_ms = self.running_elapsed();
        Some(self.snapshot())
    }

    /// Current elapsed time and accrued cost
    pub fn snapshot(&self) -> TimerSnapshot {
        let elapsed_ms = match self.state {
            TimerState::Running => self.running_elapsed(),
            TimerState::Idle => 0,
            TimerState::Paused | TimerState::Ended => self.elapsed_ms,
        };
        let cost = self
            .config
            .as_ref()
            .map(|c| c.cost_at(elapsed_ms))
            .unwrap_or(0.0);

        TimerSnapshot { elapsed_ms, cost }
    }

    fn running_elapsed(&self) -> u64 {
        let delta = self.clock.now_millis() - self.start_reference;
        u64::try_from(delta).unwrap_or(0)
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}

impl fmt::Debug for MeetingTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeetingTimer")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("start_reference", &self.start_reference)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
