//! Domain error types

use thiserror::Error;

/// Error when an attendee configuration cannot be normalized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no attendees")]
    NoAttendees,

    #[error("Invalid attendee count: {0}. Expected a whole number of at least 1")]
    InvalidCount(String),

    #[error("Invalid hourly rate: {0}. Expected a non-negative number")]
    InvalidRate(String),

    #[error("Role name must not be empty")]
    EmptyRoleName,

    #[error("No remembered rate for role \"{0}\". Provide one as <role>:<rate>:<count>")]
    UnknownRoleRate(String),
}

/// Error when parsing a role group string
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid role group: \"{input}\". Expected format: <role>:<rate>:<count> (e.g., Engineer:100:2, Engineer::2)")]
pub struct RoleGroupParseError {
    pub input: String,
}

/// Error when an unknown input mode is given
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid mode: \"{input}\". Valid modes are: list, simple, detailed")]
pub struct InvalidModeError {
    pub input: String,
}

/// Error when preference storage fails
#[derive(Debug, Clone, Error)]
pub enum PreferenceError {
    #[error("Failed to read preferences file: {0}")]
    ReadError(String),

    #[error("Failed to parse preferences file: {0}")]
    ParseError(String),

    #[error("Failed to write preferences file: {0}")]
    WriteError(String),

    #[error("Invalid preference value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Preferences file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_attendees_message() {
        assert_eq!(ValidationError::NoAttendees.to_string(), "no attendees");
    }

    #[test]
    fn role_group_parse_error_mentions_format() {
        let err = RoleGroupParseError {
            input: "Engineer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Engineer"));
        assert!(msg.contains("<role>:<rate>:<count>"));
    }

    #[test]
    fn preference_validation_message() {
        let err = PreferenceError::ValidationError {
            key: "hourly_rate".to_string(),
            message: "must be a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid preference value for 'hourly_rate': must be a number"
        );
    }
}
