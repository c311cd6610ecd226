pub mod user_prefs;

pub use user_prefs::{
    default_meeting_name, PreferenceKey, Preferences, DEFAULT_ATTENDEE_COUNT,
    DEFAULT_HOURLY_RATE,
};
