//! Error types for the kairos-schedule crate.

use crate::model::ScheduleField;

/// Error type for schedule parsing, validation, and event search.
///
/// [`OutOfScheduleRange`](ScheduleError::OutOfScheduleRange) is the only
/// variant a search can produce; every other variant is reported while
/// compiling a schedule expression or model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// No instant satisfies the schedule within the supported year range in
    /// the requested direction from the given start point.
    #[error("no matching instant in the schedule from the given start point")]
    OutOfScheduleRange,

    /// The schedule expression is empty or whitespace.
    #[error("empty schedule expression")]
    EmptySchedule,

    /// A date part appeared after the time, or appeared twice.
    #[error("date must be the first element of a schedule")]
    MisplacedDate,

    /// More than one time part appeared.
    #[error("redundant time element in schedule")]
    RedundantTime,

    /// A weekday part appeared without a preceding date, after the time, or
    /// twice.
    #[error("weekday must follow the date and precede the time")]
    MisplacedWeekday,

    /// The schedule has no time part, which is required.
    #[error("time is required in a schedule")]
    MissingTime,

    /// A date part does not split into exactly year.month.day.
    #[error("malformed date '{part}' (expected year.month.day)")]
    MalformedDate {
        /// The offending date part.
        part: String,
    },

    /// A time part does not split into exactly hour:minute:second[.millis].
    #[error("malformed time '{part}' (expected hour:minute:second[.millis])")]
    MalformedTime {
        /// The offending time part.
        part: String,
    },

    /// A range element is not one of `*`, `*/n`, `a`, `a-b`, `a-b/n`.
    #[error("malformed range '{text}'")]
    MalformedRange {
        /// The offending range element.
        text: String,
    },

    /// A range element contains something that is not a non-negative number.
    #[error("invalid number in '{text}'")]
    InvalidNumber {
        /// The offending text.
        text: String,
    },

    /// A plain `*` appeared inside a comma list (strided `*/n` is allowed).
    #[error("asterisk must not appear inside a value list for {field}")]
    AsteriskInList {
        /// The field whose list contains the asterisk.
        field: ScheduleField,
    },

    /// A range runs from greater to lesser.
    #[error("reversed range {min}-{max} for {field}")]
    ReversedRange {
        /// The field with the reversed range.
        field: ScheduleField,
        /// The lower bound as written.
        min: i32,
        /// The upper bound as written.
        max: i32,
    },

    /// A range carries a stride below one.
    #[error("step must be at least 1 for {field} (got {step})")]
    InvalidStep {
        /// The field with the invalid stride.
        field: ScheduleField,
        /// The stride as written.
        step: i32,
    },

    /// A range lies outside the field's natural bounds.
    #[error("range '{range}' is out of bounds for {field}")]
    OutOfBounds {
        /// The field whose bounds are violated.
        field: ScheduleField,
        /// The offending range, as written.
        range: String,
    },

    /// The schedule pins February 29 of a specific non-leap year.
    #[error("schedule names February 29 of {year}, which is not a leap year")]
    ImpossibleLeapDay {
        /// The non-leap year named by the schedule.
        year: i32,
    },

    /// The schedule pins February 29 but none of its years is a leap year.
    #[error("schedule pins February 29 but selects no leap year")]
    NoLeapYearSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ScheduleError::ReversedRange {
            field: ScheduleField::Hour,
            min: 20,
            max: 10,
        };
        assert_eq!(err.to_string(), "reversed range 20-10 for hour");

        let err = ScheduleError::OutOfBounds {
            field: ScheduleField::Month,
            range: "1-13".to_string(),
        };
        assert_eq!(err.to_string(), "range '1-13' is out of bounds for month");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ScheduleError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ScheduleError>();
    }
}
