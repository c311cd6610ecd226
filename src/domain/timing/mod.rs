//! Meeting timing: elapsed time, clocks and the timer state machine

pub mod clock;
pub mod elapsed;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use elapsed::{format_duration, TICK_INTERVAL_MS};
pub use timer::{CompletedMeeting, InvalidStateTransition, MeetingTimer, TimerSnapshot, TimerState};
