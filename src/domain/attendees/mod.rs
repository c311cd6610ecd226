//! Attendee input normalization

pub mod input;
pub mod role_rates;

pub use input::{
    parse_attendee_count, split_attendee_list, AttendeeInput, InputMode, RoleGroup,
    RoleGroupSpec,
};
pub use role_rates::RoleRateMemory;
