//! Error types for the kairos-calendar crate.

use crate::gregorian::{MAX_YEAR, MIN_YEAR};

/// Error type for the checked [`Calendar::new`](crate::Calendar::new)
/// constructor.
///
/// Covers validation of every calendar field against its natural bounds in
/// the restricted [2000, 2100] Gregorian calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year is outside the supported range 2000..=2100.
    #[error("invalid year: {year} (must be {MIN_YEAR}..={MAX_YEAR})")]
    InvalidYear {
        /// The invalid year that was provided.
        year: i32,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: i32,
    },

    /// Returned when a day number exceeds the length of the given month.
    #[error("invalid day: {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: i32,
        /// The month for which the day is invalid.
        month: i32,
        /// The year for which the day is invalid.
        year: i32,
        /// The last valid day of the given month.
        max_day: i32,
    },

    /// Returned when an hour is outside the valid range 0..=23.
    #[error("invalid hour: {hour} (must be 0..=23)")]
    InvalidHour {
        /// The invalid hour that was provided.
        hour: i32,
    },

    /// Returned when a minute is outside the valid range 0..=59.
    #[error("invalid minute: {minute} (must be 0..=59)")]
    InvalidMinute {
        /// The invalid minute that was provided.
        minute: i32,
    },

    /// Returned when a second is outside the valid range 0..=59.
    #[error("invalid second: {second} (must be 0..=59)")]
    InvalidSecond {
        /// The invalid second that was provided.
        second: i32,
    },

    /// Returned when a millisecond is outside the valid range 0..=999.
    #[error("invalid millisecond: {millisecond} (must be 0..=999)")]
    InvalidMillisecond {
        /// The invalid millisecond that was provided.
        millisecond: i32,
    },
}
