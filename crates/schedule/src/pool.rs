//! The per-schedule pool of field matchers and weekday maps.

use kairos_calendar::{MAX_YEAR, MIN_YEAR, WeekdayMap, leap_year};
use kairos_matcher::{
    BitsetMatcher, DigitMatcher, LAST_DAY_OF_MONTH, Matcher, RangeSet, build_matcher,
};
use tracing::debug;

use crate::digits::{DIGIT_COUNT, YEAR};
use crate::error::ScheduleError;
use crate::model::{FEBRUARY_LEAP_DAY, ScheduleField, ScheduleModel};

/// The seven cascading digit fields, most significant first. Day of week is
/// not a digit; it is modeled by the weekday maps.
const DIGIT_FIELDS: [ScheduleField; DIGIT_COUNT] = [
    ScheduleField::Year,
    ScheduleField::Month,
    ScheduleField::DayOfMonth,
    ScheduleField::Hour,
    ScheduleField::Minute,
    ScheduleField::Second,
    ScheduleField::Milli,
];

/// Matchers and weekday maps compiled once per schedule.
///
/// Immutable after construction; any number of concurrent searches may share
/// one pool by reference.
#[derive(Debug)]
pub(crate) struct MatcherPool {
    matchers: [Matcher; DIGIT_COUNT],
    week_map: WeekdayMap,
    month_days: WeekdayMap,
    normal_year: WeekdayMap,
    leap_year: WeekdayMap,
}

impl MatcherPool {
    /// Compiles the matchers and weekday maps for a validated model.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NoLeapYearSelected`] if the schedule pins
    /// February 29 but none of its years is leap.
    pub fn new(model: &ScheduleModel) -> Result<Self, ScheduleError> {
        let mut matchers = DIGIT_FIELDS.map(|f| build_matcher(model.ranges(f), f.bounds()));
        restrict_to_leap_years(&mut matchers, model)?;

        let month_days = month_days_map(model.ranges(ScheduleField::DayOfMonth));
        let pool = Self {
            week_map: week_map(model.ranges(ScheduleField::DayOfWeek)),
            normal_year: year_map(model.ranges(ScheduleField::Month), month_days, false),
            leap_year: year_map(model.ranges(ScheduleField::Month), month_days, true),
            month_days,
            matchers,
        };

        debug!(
            year = pool.matchers[0].kind(),
            month = pool.matchers[1].kind(),
            day = pool.matchers[2].kind(),
            hour = pool.matchers[3].kind(),
            minute = pool.matchers[4].kind(),
            second = pool.matchers[5].kind(),
            milli = pool.matchers[6].kind(),
            "selected matcher representations"
        );
        Ok(pool)
    }

    /// The matcher bound to a digit index (0 = year ... 6 = milliseconds).
    pub fn matcher(&self, digit: usize) -> &Matcher {
        &self.matchers[digit]
    }

    /// The scheduled weekdays.
    pub fn week_map(&self) -> WeekdayMap {
        self.week_map
    }

    /// Day-of-month positions of the schedule, as a January-anchored map.
    pub fn month_days_map(&self) -> WeekdayMap {
        self.month_days
    }

    /// Union of the schedule's monthly maps over a non-leap year.
    pub fn normal_year_map(&self) -> WeekdayMap {
        self.normal_year
    }

    /// Union of the schedule's monthly maps over a leap year.
    pub fn leap_year_map(&self) -> WeekdayMap {
        self.leap_year
    }
}

/// Builds the weekday set from the day-of-week ranges (0 = Sunday).
fn week_map(set: &RangeSet) -> WeekdayMap {
    let mut map = WeekdayMap::EMPTY;
    for range in set.iter() {
        if range.is_asterisk() && !range.is_stepped() {
            return WeekdayMap::FULL;
        }
        if range.is_asterisk() {
            let mut wd = 0;
            while wd <= 6 {
                map.add_weekday(wd);
                wd += range.step();
            }
        } else if range.is_constant() {
            map.add_weekday(range.min());
        } else {
            let mut wd = range.min();
            while wd <= range.max() {
                map.add_weekday(wd);
                wd += range.step();
            }
        }
    }
    map
}

/// Builds the day-of-month position map from the day ranges, expanding the
/// "last day" sentinel to every day number that can end a month (28..=31).
fn month_days_map(set: &RangeSet) -> WeekdayMap {
    let mut map = WeekdayMap::EMPTY;
    for range in set.iter() {
        if range.is_asterisk() && !range.is_stepped() {
            return WeekdayMap::FULL;
        }
        if range.is_asterisk() {
            let mut day = 1;
            while day <= 31 {
                map.add_day(day);
                day += range.step();
            }
        } else if range.is_constant() && range.min() == LAST_DAY_OF_MONTH {
            for day in 28..=31 {
                map.add_day(day);
            }
        } else if range.max() == LAST_DAY_OF_MONTH {
            // x-32/n: the written days, plus every possible month end the
            // stride can land on
            let mut day = range.min();
            while day <= 31 {
                map.add_day(day);
                day += range.step();
            }
            let mut from = range.min().max(28);
            from -= (from - range.min()) % range.step();
            let mut day = from;
            while day <= 31 {
                map.add_day(day);
                day += range.step();
            }
        } else if range.is_constant() {
            map.add_day(range.min());
        } else {
            let mut day = range.min();
            while day <= range.max() {
                map.add_day(day);
                day += range.step();
            }
        }
    }
    map
}

/// Unions the day map rotated into every scheduled month of a year.
fn year_map(months: &RangeSet, days: WeekdayMap, for_leap: bool) -> WeekdayMap {
    let mut map = WeekdayMap::EMPTY;
    for range in months.iter() {
        if range.is_asterisk() {
            let mut month = 1;
            while month <= 12 {
                map.merge(days.for_month(month, for_leap));
                month += range.step();
            }
        } else if range.is_constant() {
            map.merge(days.for_month(range.min(), for_leap));
        } else {
            let mut month = range.min();
            while month <= range.max() {
                map.merge(days.for_month(month, for_leap));
                month += range.step();
            }
        }
    }
    map
}

/// A schedule pinned to exactly February 29 can only ever fire in leap
/// years: the year matcher is narrowed to the scheduled leap years up front
/// so the search skips the other three quarters of the calendar.
fn restrict_to_leap_years(
    matchers: &mut [Matcher; DIGIT_COUNT],
    model: &ScheduleModel,
) -> Result<(), ScheduleError> {
    let months = model.ranges(ScheduleField::Month);
    let days = model.ranges(ScheduleField::DayOfMonth);
    if !(months.is_single() && days.is_single()) {
        return Ok(());
    }
    let month = months.first();
    let day = days.first();
    let pinned = month.is_constant()
        && month.min() == 2
        && day.is_constant()
        && day.min() == FEBRUARY_LEAP_DAY;
    if !pinned {
        return Ok(());
    }

    let mut min = MIN_YEAR;
    while !leap_year(min) {
        min += 1;
    }
    let mut max = MAX_YEAR;
    while !leap_year(max) {
        max -= 1;
    }

    let years = &matchers[YEAR];
    let filtered = BitsetMatcher::from_values(
        min,
        max,
        (min..=max).step_by(4).filter(|&year| years.matches(year)),
    );
    if filtered.is_empty() {
        return Err(ScheduleError::NoLeapYearSelected);
    }
    matchers[YEAR] = Matcher::Bitset(filtered);
    Ok(())
}
