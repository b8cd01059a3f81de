//! Schedule model: per-field range sets with defaults and validation.

use std::fmt;

use kairos_calendar::{MAX_YEAR, MIN_YEAR, leap_year};
use kairos_matcher::{FieldBounds, LAST_DAY_OF_MONTH, Range, RangeSet};

use crate::error::ScheduleError;

/// February 29, the day that exists only in leap years.
pub(crate) const FEBRUARY_LEAP_DAY: i32 = 29;

/// One of the eight schedulable calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    /// Year (2000..=2100).
    Year,
    /// Month (1..=12).
    Month,
    /// Day of month (1..=31, or the sentinel 32 for "last day").
    DayOfMonth,
    /// Day of week (0 = Sunday ..= 6 = Saturday).
    DayOfWeek,
    /// Hour (0..=23).
    Hour,
    /// Minute (0..=59).
    Minute,
    /// Second (0..=59).
    Second,
    /// Millisecond (0..=999).
    Milli,
}

impl ScheduleField {
    /// All fields in schedule order.
    pub const ALL: [ScheduleField; 8] = [
        ScheduleField::Year,
        ScheduleField::Month,
        ScheduleField::DayOfMonth,
        ScheduleField::DayOfWeek,
        ScheduleField::Hour,
        ScheduleField::Minute,
        ScheduleField::Second,
        ScheduleField::Milli,
    ];

    /// Natural bounds of the field.
    pub fn bounds(self) -> FieldBounds {
        match self {
            ScheduleField::Year => FieldBounds::new(MIN_YEAR, MAX_YEAR),
            ScheduleField::Month => FieldBounds::new(1, 12),
            ScheduleField::DayOfMonth => FieldBounds::new(1, 31),
            ScheduleField::DayOfWeek => FieldBounds::new(0, 6),
            ScheduleField::Hour => FieldBounds::new(0, 23),
            ScheduleField::Minute => FieldBounds::new(0, 59),
            ScheduleField::Second => FieldBounds::new(0, 59),
            ScheduleField::Milli => FieldBounds::new(0, 999),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleField::Year => "year",
            ScheduleField::Month => "month",
            ScheduleField::DayOfMonth => "day of month",
            ScheduleField::DayOfWeek => "day of week",
            ScheduleField::Hour => "hour",
            ScheduleField::Minute => "minute",
            ScheduleField::Second => "second",
            ScheduleField::Milli => "millisecond",
        };
        f.write_str(name)
    }
}

/// A complete per-field schedule description.
///
/// Fields left unset are filled by [`apply_defaults`](ScheduleModel::apply_defaults):
/// a missing date means `*.*.*`, a missing weekday means `*`, and missing
/// milliseconds mean exactly `0`.
#[derive(Debug, Clone, Default)]
pub struct ScheduleModel {
    fields: [Option<RangeSet>; 8],
}

impl ScheduleModel {
    /// Creates a model with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the range set for one field.
    pub fn set(&mut self, field: ScheduleField, ranges: RangeSet) {
        self.fields[field.index()] = Some(ranges);
    }

    /// Returns the range set for one field, if set.
    pub fn get(&self, field: ScheduleField) -> Option<&RangeSet> {
        self.fields[field.index()].as_ref()
    }

    /// Returns the range set for one field. Defaults must have been applied.
    pub(crate) fn ranges(&self, field: ScheduleField) -> &RangeSet {
        self.fields[field.index()]
            .as_ref()
            .expect("defaults applied before the model is consumed")
    }

    /// Returns true if the date fields are set.
    pub fn has_date(&self) -> bool {
        self.get(ScheduleField::Year).is_some()
    }

    /// Returns true if the time fields are set.
    pub fn has_time(&self) -> bool {
        self.get(ScheduleField::Hour).is_some()
    }

    /// Returns true if the weekday field is set.
    pub fn has_weekday(&self) -> bool {
        self.get(ScheduleField::DayOfWeek).is_some()
    }

    /// Returns true if the millisecond field is set.
    pub fn has_millis(&self) -> bool {
        self.get(ScheduleField::Milli).is_some()
    }

    /// Fills unset fields with their documented defaults.
    pub fn apply_defaults(&mut self) {
        if !self.has_date() {
            self.set(ScheduleField::Year, RangeSet::any());
            self.set(ScheduleField::Month, RangeSet::any());
            self.set(ScheduleField::DayOfMonth, RangeSet::any());
        }
        if !self.has_weekday() {
            self.set(ScheduleField::DayOfWeek, RangeSet::any());
        }
        if !self.has_millis() {
            self.set(ScheduleField::Milli, RangeSet::single(Range::value(0)));
        }
    }

    /// Checks the logical correctness of the model. Every field must be set
    /// (apply defaults first).
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a plain asterisk inside a list, a
    /// reversed range, a stride below one, a range outside the field's
    /// bounds, or a pinned February 29 in a non-leap year.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.check_asterisks_in_lists()?;
        self.check_ordered_ranges()?;
        self.check_steps()?;
        self.check_bounds()?;
        self.check_leap_day()
    }

    fn check_asterisks_in_lists(&self) -> Result<(), ScheduleError> {
        for field in ScheduleField::ALL {
            let set = self.ranges(field);
            if set.is_single() {
                continue;
            }
            for range in set.iter() {
                if range.is_asterisk() && !range.is_stepped() {
                    return Err(ScheduleError::AsteriskInList { field });
                }
            }
        }
        Ok(())
    }

    fn check_ordered_ranges(&self) -> Result<(), ScheduleError> {
        for field in ScheduleField::ALL {
            for range in self.ranges(field).iter() {
                if !range.is_asterisk() && range.min() > range.max() {
                    return Err(ScheduleError::ReversedRange {
                        field,
                        min: range.min(),
                        max: range.max(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_steps(&self) -> Result<(), ScheduleError> {
        for field in ScheduleField::ALL {
            for range in self.ranges(field).iter() {
                if range.step() < 1 {
                    return Err(ScheduleError::InvalidStep {
                        field,
                        step: range.step(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_bounds(&self) -> Result<(), ScheduleError> {
        for field in ScheduleField::ALL {
            let bounds = field.bounds();
            for range in self.ranges(field).iter() {
                if range.is_asterisk() {
                    continue;
                }
                let mut valid = range.min() >= bounds.min && range.max() <= bounds.max;
                if !valid && field == ScheduleField::DayOfMonth {
                    // the sentinel day 32 means "last day of the month", both
                    // alone and as the top of a range
                    valid = range.min() >= bounds.min && range.max() == LAST_DAY_OF_MONTH;
                }
                if !valid {
                    return Err(ScheduleError::OutOfBounds {
                        field,
                        range: range.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// A schedule of the shape `year.02.29` with a constant non-leap year can
    /// never fire.
    fn check_leap_day(&self) -> Result<(), ScheduleError> {
        let years = self.ranges(ScheduleField::Year);
        let months = self.ranges(ScheduleField::Month);
        let days = self.ranges(ScheduleField::DayOfMonth);

        if years.is_single() && months.is_single() && days.is_single() {
            let year = years.first();
            let month = months.first();
            let day = days.first();
            if month.is_constant()
                && month.min() == 2
                && day.is_constant()
                && day.min() == FEBRUARY_LEAP_DAY
                && year.is_constant()
                && !leap_year(year.min())
            {
                return Err(ScheduleError::ImpossibleLeapDay { year: year.min() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |field: ScheduleField| -> String {
            self.get(field)
                .map_or_else(|| "?".to_string(), RangeSet::to_string)
        };
        write!(
            f,
            "[{}.{}.{}] {} [{}:{}:{}.{}]",
            part(ScheduleField::Year),
            part(ScheduleField::Month),
            part(ScheduleField::DayOfMonth),
            part(ScheduleField::DayOfWeek),
            part(ScheduleField::Hour),
            part(ScheduleField::Minute),
            part(ScheduleField::Second),
            part(ScheduleField::Milli),
        )
    }
}
