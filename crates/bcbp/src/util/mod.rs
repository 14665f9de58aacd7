//! Utility modules.

pub mod julian;

pub use julian::{
    is_leap_year, resolve_issue_date, resolve_julian_date, CalendarDate, DateParseError,
};
