//! Attendee input modes and normalization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{InvalidModeError, RoleGroupParseError, ValidationError};
use crate::domain::meeting::{validate_rate, MeetingConfig};

use super::role_rates::RoleRateMemory;

/// How attendees are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Named attendees sharing one rate
    #[default]
    List,
    /// Head count and one rate
    Simple,
    /// Role groups with their own rates
    Detailed,
}

impl InputMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Simple => "simple",
            Self::Detailed => "detailed",
        }
    }

    pub const fn all() -> &'static [InputMode] {
        &[Self::List, Self::Simple, Self::Detailed]
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "simple" => Ok(Self::Simple),
            "detailed" | "role" | "roles" => Ok(Self::Detailed),
            _ => Err(InvalidModeError {
                input: s.to_string(),
            }),
        }
    }
}

/// A named cohort of attendees sharing one hourly rate
#[derive(Debug, Clone, PartialEq)]
pub struct RoleGroup {
    pub role_name: String,
    pub hourly_rate: f64,
    pub count: u32,
}

impl RoleGroup {
    pub fn new(role_name: impl Into<String>, hourly_rate: f64, count: u32) -> Self {
        Self {
            role_name: role_name.into(),
            hourly_rate,
            count,
        }
    }
}

impl fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.role_name, self.hourly_rate, self.count)
    }
}

/// A role group as typed by the user; the rate may be left for
/// role-rate memory to fill in.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleGroupSpec {
    pub role_name: String,
    pub hourly_rate: Option<f64>,
    pub count: u32,
}

impl RoleGroupSpec {
    /// Fill in a missing rate from remembered role rates
    pub fn resolve(&self, memory: &RoleRateMemory) -> Result<RoleGroup, ValidationError> {
        let hourly_rate = match self.hourly_rate {
            Some(rate) => rate,
            None => memory
                .rate_for(&self.role_name)
                .ok_or_else(|| ValidationError::UnknownRoleRate(self.role_name.clone()))?,
        };

        Ok(RoleGroup::new(self.role_name.clone(), hourly_rate, self.count))
    }
}

impl FromStr for RoleGroupSpec {
    type Err = RoleGroupParseError;

    /// Parse `<role>:<rate>:<count>`; an empty rate (`Engineer::2`) means
    /// "use the remembered rate".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RoleGroupParseError {
            input: s.to_string(),
        };

        let mut parts = s.trim().rsplitn(3, ':');
        let count = parts.next().ok_or_else(err)?.trim();
        let rate = parts.next().ok_or_else(err)?.trim();
        let role_name = parts.next().ok_or_else(err)?.trim();

        if role_name.is_empty() {
            return Err(err());
        }

        let count: u32 = count.parse().map_err(|_| err())?;
        let hourly_rate = if rate.is_empty() {
            None
        } else {
            Some(rate.parse::<f64>().map_err(|_| err())?)
        };

        Ok(Self {
            role_name: role_name.to_string(),
            hourly_rate,
            count,
        })
    }
}

impl From<RoleGroup> for RoleGroupSpec {
    fn from(group: RoleGroup) -> Self {
        Self {
            role_name: group.role_name,
            hourly_rate: Some(group.hourly_rate),
            count: group.count,
        }
    }
}

/// The three mutually exclusive ways of describing who attends
#[derive(Debug, Clone, PartialEq)]
pub enum AttendeeInput {
    List { text: String, hourly_rate: f64 },
    Simple { count: u32, hourly_rate: f64 },
    Detailed { groups: Vec<RoleGroup> },
}

impl AttendeeInput {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::List { .. } => InputMode::List,
            Self::Simple { .. } => InputMode::Simple,
            Self::Detailed { .. } => InputMode::Detailed,
        }
    }

    /// Normalize into the canonical meeting configuration
    pub fn normalize(&self, meeting_name: &str) -> Result<MeetingConfig, ValidationError> {
        let name = meeting_name.trim();
        match self {
            Self::List { text, hourly_rate } => {
                let names = split_attendee_list(text);
                MeetingConfig::new(name, *hourly_rate, names)
            }
            Self::Simple { count, hourly_rate } => {
                if *count < 1 {
                    return Err(ValidationError::InvalidCount(count.to_string()));
                }
                let names = (1..=*count).map(|i| format!("Attendee {}", i)).collect();
                MeetingConfig::new(name, *hourly_rate, names)
            }
            Self::Detailed { groups } => normalize_groups(name, groups),
        }
    }
}

fn normalize_groups(name: &str, groups: &[RoleGroup]) -> Result<MeetingConfig, ValidationError> {
    let mut names = Vec::new();
    let mut weighted_total = 0.0;

    for group in groups {
        let role = group.role_name.trim();
        if role.is_empty() {
            return Err(ValidationError::EmptyRoleName);
        }
        validate_rate(group.hourly_rate)?;

        weighted_total += group.count as f64 * group.hourly_rate;
        names.extend((1..=group.count).map(|i| format!("{} {}", role, i)));
    }

    if names.is_empty() {
        return Err(ValidationError::NoAttendees);
    }

    let average = weighted_total / names.len() as f64;
    MeetingConfig::new(name, average, names)
}

/// Split attendee text on newlines and commas, trimming and dropping empties
pub fn split_attendee_list(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a head count typed as text; must be a whole number of at least 1
pub fn parse_attendee_count(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ValidationError::InvalidCount(input.trim().to_string())),
    }
}
