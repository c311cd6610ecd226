//! User preference value object

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::attendees::{parse_attendee_count, InputMode, RoleGroupSpec, RoleRateMemory};
use crate::domain::error::PreferenceError;
use crate::domain::meeting::validate_rate;

/// Default hourly rate per attendee
pub const DEFAULT_HOURLY_RATE: f64 = 50.0;

/// Default head count for simple mode
pub const DEFAULT_ATTENDEE_COUNT: u32 = 1;

/// Suffix of the generated meeting name
pub const DEFAULT_MEETING_SUFFIX: &str = "Staff Sync";

/// Enumerated preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    MeetingName,
    HourlyRate,
    Mode,
    Attendees,
    AttendeeCount,
    Roles,
}

impl PreferenceKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MeetingName => "meeting_name",
            Self::HourlyRate => "hourly_rate",
            Self::Mode => "mode",
            Self::Attendees => "attendees",
            Self::AttendeeCount => "attendee_count",
            Self::Roles => "roles",
        }
    }

    pub const fn all() -> &'static [PreferenceKey] {
        &[
            Self::MeetingName,
            Self::HourlyRate,
            Self::Mode,
            Self::Attendees,
            Self::AttendeeCount,
            Self::Roles,
        ]
    }

    /// Comma-separated list of valid key names
    pub fn valid_keys() -> String {
        Self::all()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| PreferenceError::ValidationError {
                key: s.to_string(),
                message: format!("Unknown key. Valid keys: {}", Self::valid_keys()),
            })
    }
}

/// Last-used meeting inputs and remembered role rates.
/// All fields are optional to support partial files and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub meeting_name: Option<String>,
    pub hourly_rate: Option<f64>,
    pub mode: Option<String>,
    /// Raw attendee list text (list mode)
    pub attendees: Option<String>,
    pub attendee_count: Option<u32>,
    /// Role groups as `<role>:<rate>:<count>` (detailed mode)
    pub roles: Option<Vec<String>>,
    pub role_rates: Option<BTreeMap<String, f64>>,
}

impl Preferences {
    /// Create preferences with default values
    pub fn defaults() -> Self {
        Self {
            meeting_name: None,
            hourly_rate: Some(DEFAULT_HOURLY_RATE),
            mode: Some(InputMode::default().to_string()),
            attendees: None,
            attendee_count: Some(DEFAULT_ATTENDEE_COUNT),
            roles: None,
            role_rates: None,
        }
    }

    /// Create empty preferences (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge with another set, where other takes precedence.
    /// Role rates are merged key by key.
    pub fn merge(self, other: Self) -> Self {
        Self {
            meeting_name: other.meeting_name.or(self.meeting_name),
            hourly_rate: other.hourly_rate.or(self.hourly_rate),
            mode: other.mode.or(self.mode),
            attendees: other.attendees.or(self.attendees),
            attendee_count: other.attendee_count.or(self.attendee_count),
            roles: other.roles.or(self.roles),
            role_rates: match (self.role_rates, other.role_rates) {
                (None, None) => None,
                (Some(b), None) => Some(b),
                (None, Some(o)) => Some(o),
                (Some(mut b), Some(o)) => {
                    b.extend(o);
                    Some(b)
                }
            },
        }
    }

    /// Saved meeting name, or `"<date> - Staff Sync"`
    pub fn meeting_name_or_default(&self, today: NaiveDate) -> String {
        self.meeting_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_meeting_name(today))
    }

    /// Saved hourly rate, or 50.00 if not set/invalid
    pub fn hourly_rate_or_default(&self) -> f64 {
        self.hourly_rate
            .filter(|r| validate_rate(*r).is_ok())
            .unwrap_or(DEFAULT_HOURLY_RATE)
    }

    /// Saved input mode, or list if not set/invalid
    pub fn mode_or_default(&self) -> InputMode {
        self.mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Saved head count, or 1 if not set/invalid
    pub fn attendee_count_or_default(&self) -> u32 {
        self.attendee_count
            .filter(|c| *c >= 1)
            .unwrap_or(DEFAULT_ATTENDEE_COUNT)
    }

    /// Saved attendee list text, or empty
    pub fn attendees_or_default(&self) -> &str {
        self.attendees.as_deref().unwrap_or("")
    }

    /// Saved role groups; unparseable entries are skipped
    pub fn role_specs(&self) -> Vec<RoleGroupSpec> {
        self.roles
            .iter()
            .flatten()
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    /// Remembered role rates
    pub fn role_memory(&self) -> RoleRateMemory {
        RoleRateMemory::from_map(self.role_rates.clone().unwrap_or_default())
    }

    /// Replace remembered role rates
    pub fn set_role_memory(&mut self, memory: RoleRateMemory) {
        self.role_rates = if memory.is_empty() {
            None
        } else {
            Some(memory.into_map())
        };
    }

    /// Get a key as display text
    pub fn get(&self, key: PreferenceKey) -> Option<String> {
        match key {
            PreferenceKey::MeetingName => self.meeting_name.clone(),
            PreferenceKey::HourlyRate => self.hourly_rate.map(|r| format!("{:.2}", r)),
            PreferenceKey::Mode => self.mode.clone(),
            PreferenceKey::Attendees => self.attendees.clone(),
            PreferenceKey::AttendeeCount => self.attendee_count.map(|c| c.to_string()),
            PreferenceKey::Roles => self.roles.as_ref().map(|r| r.join(", ")),
        }
    }

    /// Validate and set a key from text
    pub fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError> {
        let invalid = |message: String| PreferenceError::ValidationError {
            key: key.to_string(),
            message,
        };

        match key {
            PreferenceKey::MeetingName => {
                self.meeting_name = Some(value.trim().to_string());
            }
            PreferenceKey::HourlyRate => {
                let rate: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("Value must be a number".to_string()))?;
                validate_rate(rate).map_err(|e| invalid(e.to_string()))?;
                self.hourly_rate = Some(rate);
            }
            PreferenceKey::Mode => {
                let mode: InputMode = value.parse().map_err(|e| invalid(format!("{}", e)))?;
                self.mode = Some(mode.to_string());
            }
            PreferenceKey::Attendees => {
                self.attendees = Some(value.to_string());
            }
            PreferenceKey::AttendeeCount => {
                let count = parse_attendee_count(value).map_err(|e| invalid(e.to_string()))?;
                self.attendee_count = Some(count);
            }
            PreferenceKey::Roles => {
                let roles = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        s.parse::<RoleGroupSpec>()
                            .map(|_| s.to_string())
                            .map_err(|e| invalid(e.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.roles = Some(roles);
            }
        }
        Ok(())
    }
}

/// Placeholder meeting name stamped with a date
pub fn default_meeting_name(today: NaiveDate) -> String {
    format!("{} - {}", today.format("%Y-%m-%d"), DEFAULT_MEETING_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn defaults_have_expected_values() {
        let prefs = Preferences::defaults();
        assert_eq!(prefs.hourly_rate, Some(50.0));
        assert_eq!(prefs.mode, Some("list".to_string()));
        assert_eq!(prefs.attendee_count, Some(1));
        assert!(prefs.meeting_name.is_none());
        assert!(prefs.role_rates.is_none());
    }

    #[test]
    fn empty_falls_back_to_documented_defaults() {
        let prefs = Preferences::empty();
        assert_eq!(prefs.meeting_name_or_default(date()), "2024-03-05 - Staff Sync");
        assert_eq!(prefs.hourly_rate_or_default(), 50.0);
        assert_eq!(prefs.mode_or_default(), InputMode::List);
        assert_eq!(prefs.attendee_count_or_default(), 1);
        assert_eq!(prefs.attendees_or_default(), "");
        assert!(prefs.role_specs().is_empty());
        assert!(prefs.role_memory().is_empty());
    }

    #[test]
    fn invalid_saved_values_use_defaults() {
        let prefs = Preferences {
            meeting_name: Some("   ".to_string()),
            hourly_rate: Some(-3.0),
            mode: Some("weekly".to_string()),
            attendee_count: Some(0),
            ..Default::default()
        };
        assert_eq!(prefs.meeting_name_or_default(date()), "2024-03-05 - Staff Sync");
        assert_eq!(prefs.hourly_rate_or_default(), 50.0);
        assert_eq!(prefs.mode_or_default(), InputMode::List);
        assert_eq!(prefs.attendee_count_or_default(), 1);
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = Preferences {
            meeting_name: Some("Base".to_string()),
            hourly_rate: Some(40.0),
            ..Default::default()
        };
        let other = Preferences {
            meeting_name: Some("Other".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.meeting_name, Some("Other".to_string()));
        assert_eq!(merged.hourly_rate, Some(40.0));
    }

    #[test]
    fn merge_role_rates_per_key() {
        let mut base_rates = BTreeMap::new();
        base_rates.insert("Engineer".to_string(), 100.0);
        base_rates.insert("Manager".to_string(), 150.0);
        let mut other_rates = BTreeMap::new();
        other_rates.insert("Engineer".to_string(), 120.0);

        let merged = Preferences {
            role_rates: Some(base_rates),
            ..Default::default()
        }
        .merge(Preferences {
            role_rates: Some(other_rates),
            ..Default::default()
        });

        let memory = merged.role_memory();
        assert_eq!(memory.get("Engineer"), Some(120.0));
        assert_eq!(memory.get("Manager"), Some(150.0));
    }

    #[test]
    fn set_and_get_values() {
        let mut prefs = Preferences::empty();
        prefs.set(PreferenceKey::HourlyRate, "72.5").unwrap();
        prefs.set(PreferenceKey::Mode, "Detailed").unwrap();
        prefs.set(PreferenceKey::AttendeeCount, "6").unwrap();
        prefs.set(PreferenceKey::Roles, "Engineer:100:2, Manager::1").unwrap();

        assert_eq!(prefs.get(PreferenceKey::HourlyRate), Some("72.50".to_string()));
        assert_eq!(prefs.get(PreferenceKey::Mode), Some("detailed".to_string()));
        assert_eq!(prefs.get(PreferenceKey::AttendeeCount), Some("6".to_string()));
        assert_eq!(prefs.role_specs().len(), 2);
        assert!(prefs.get(PreferenceKey::Attendees).is_none());
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut prefs = Preferences::empty();
        assert!(prefs.set(PreferenceKey::HourlyRate, "lots").is_err());
        assert!(prefs.set(PreferenceKey::HourlyRate, "-1").is_err());
        assert!(prefs.set(PreferenceKey::Mode, "weekly").is_err());
        assert!(prefs.set(PreferenceKey::AttendeeCount, "2.5").is_err());
        assert!(prefs.set(PreferenceKey::Roles, "Engineer").is_err());
        assert_eq!(prefs, Preferences::empty());
    }

    #[test]
    fn key_parsing() {
        assert_eq!("hourly_rate".parse::<PreferenceKey>().unwrap(), PreferenceKey::HourlyRate);
        assert_eq!("roles".parse::<PreferenceKey>().unwrap(), PreferenceKey::Roles);
        let err = "api_key".parse::<PreferenceKey>().unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }

    #[test]
    fn role_memory_round_trip() {
        let mut prefs = Preferences::empty();
        let mut memory = prefs.role_memory();
        memory.remember("Engineer", 100.0);
        prefs.set_role_memory(memory);

        assert_eq!(prefs.role_memory().get("Engineer"), Some(100.0));

        prefs.set_role_memory(RoleRateMemory::default());
        assert!(prefs.role_rates.is_none());
    }
}
