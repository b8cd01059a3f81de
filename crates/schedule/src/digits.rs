//! The calendar cursor: seven fields as an ordered digit sequence.
//!
//! Index 0 is the year (most significant), index 6 the milliseconds. The
//! cursor binds the schedule's matcher pool to a live [`Calendar`] and walks
//! the digits odometer-style: resetting a digit to its boundary value, or
//! advancing it and carrying into the next more significant digit when it has
//! no further legal value. Carrying past the year digit means the schedule
//! holds no further instant in the search direction.
//!
//! Single-use and mutable; one cursor per search or generator.

use kairos_calendar::{Calendar, DateField};
use kairos_matcher::{DigitMatcher, LastDayProxy, Matcher};

use crate::error::ScheduleError;
use crate::pool::MatcherPool;

/// Number of cascading digits.
pub(crate) const DIGIT_COUNT: usize = 7;

/// Digit index of the year.
pub(crate) const YEAR: usize = 0;
/// Digit index of the month.
pub(crate) const MONTH: usize = 1;
/// Digit index of the day of month.
pub(crate) const DAY: usize = 2;
/// Digit index of the hour.
pub(crate) const HOUR: usize = 3;
/// Digit index of the milliseconds, the least significant digit.
pub(crate) const LAST: usize = DIGIT_COUNT - 1;

/// A mutable cursor over the seven calendar digits, bound to a matcher pool
/// and a search direction.
///
/// With `to_zero` set the cursor works toward the future: digits reset to
/// their low bounds and advance upward. Cleared, every operation mirrors:
/// resets go to high bounds and advances step downward.
pub(crate) struct CalendarDigits<'a> {
    pool: &'a MatcherPool,
    calendar: Calendar,
    current: usize,
    to_zero: bool,
    day_proxied: bool,
}

impl<'a> CalendarDigits<'a> {
    /// Binds a cursor at the year digit.
    pub fn new(pool: &'a MatcherPool, calendar: Calendar, to_zero: bool) -> Self {
        let day_proxied = LastDayProxy::required(pool.matcher(DAY));
        Self {
            pool,
            calendar,
            current: YEAR,
            to_zero,
            day_proxied,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut Calendar {
        &mut self.calendar
    }

    pub fn to_zero(&self) -> bool {
        self.to_zero
    }

    fn field(&self) -> DateField {
        DateField::ALL[self.current]
    }

    /// Value of the active digit.
    pub fn value(&self) -> i32 {
        self.calendar.get(self.field())
    }

    fn set_value(&mut self, value: i32) {
        let field = self.field();
        self.calendar.set(field, value);
    }

    /// Runs a query against the active digit's matcher, wrapping the day
    /// digit with the live month length when its static bounds can overflow
    /// a month.
    fn with_digit<R>(&self, query: impl FnOnce(&dyn DigitMatcher) -> R) -> R {
        let matcher: &Matcher = self.pool.matcher(self.current);
        if self.current == DAY && self.day_proxied {
            query(&LastDayProxy::new(matcher, self.calendar.max_day()))
        } else {
            query(matcher)
        }
    }

    pub fn matches(&self, value: i32) -> bool {
        self.with_digit(|m| m.matches(value))
    }

    /// True if `value` comes before every legal value in the search
    /// direction (below the low bound going forward, above the high bound
    /// going backward).
    pub fn is_before_range(&self, value: i32) -> bool {
        self.with_digit(|m| {
            if self.to_zero {
                m.is_below(value)
            } else {
                m.is_above(value)
            }
        })
    }

    /// True if `value` lies past every legal value in the search direction.
    pub fn is_beyond_range(&self, value: i32) -> bool {
        self.with_digit(|m| {
            if self.to_zero {
                m.is_above(value)
            } else {
                m.is_below(value)
            }
        })
    }

    /// The boundary value a reset assigns: the low bound going forward, the
    /// high bound going backward.
    fn reset_bound(&self) -> i32 {
        self.with_digit(|m| if self.to_zero { m.low() } else { m.high() })
    }

    /// True if the active digit has a further legal value after `value` in
    /// the search direction.
    pub fn can_advance(&self, value: i32) -> bool {
        self.with_digit(|m| {
            if self.to_zero {
                m.has_next(value)
            } else {
                m.has_prev(value)
            }
        })
    }

    /// The next legal value after `value` in the search direction. Guard
    /// with [`can_advance`](Self::can_advance).
    pub fn advance_from(&self, value: i32) -> i32 {
        self.with_digit(|m| if self.to_zero { m.next(value) } else { m.prev(value) })
    }

    pub fn is_last(&self) -> bool {
        self.current == LAST
    }

    /// Moves to the next less significant digit.
    pub fn descend(&mut self) {
        self.current += 1;
    }

    /// Moves to the next more significant digit.
    ///
    /// # Errors
    ///
    /// Underflow past the year digit means the schedule is exhausted.
    pub fn retreat(&mut self) -> Result<(), ScheduleError> {
        if self.current == YEAR {
            return Err(ScheduleError::OutOfScheduleRange);
        }
        self.current -= 1;
        Ok(())
    }

    pub fn goto_year(&mut self) {
        self.current = YEAR;
    }

    pub fn goto_month(&mut self) {
        self.current = MONTH;
    }

    pub fn goto_day(&mut self) {
        self.current = DAY;
    }

    pub fn goto_hour(&mut self) {
        self.current = HOUR;
    }

    pub fn goto_last(&mut self) {
        self.current = LAST;
    }

    /// Resets the digits from the active one down to the least significant,
    /// each to its boundary value in the search direction.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if a day-of-month
    /// overflow cascades past the year digit.
    pub fn initialize(&mut self) -> Result<(), ScheduleError> {
        self.cascade(true, LAST)
    }

    /// Advances the active digit to its next legal value, carrying into more
    /// significant digits as needed and resetting everything below.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if the carry passes the
    /// year digit.
    pub fn increment(&mut self) -> Result<(), ScheduleError> {
        self.cascade(false, LAST)
    }

    /// Like [`initialize`](Self::initialize) restricted to the date digits
    /// (year, month, day); used by the weekday correction.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if the date overflow
    /// cascades past the year digit.
    pub fn reset_date(&mut self) -> Result<(), ScheduleError> {
        self.cascade(true, DAY)
    }

    /// One loop serves both reset and advance: `resetting` selects the mode
    /// for the digit at hand, and flips to true once a carry is absorbed.
    /// Moving down resets; failing to advance moves up.
    fn cascade(&mut self, mut resetting: bool, floor: usize) -> Result<(), ScheduleError> {
        loop {
            if self.current == DAY {
                resetting = self.try_setup_day(resetting);
            } else if resetting {
                let bound = self.reset_bound();
                self.set_value(bound);
            } else {
                let value = self.value();
                resetting = self.can_advance(value);
                if resetting {
                    let next = self.advance_from(value);
                    self.set_value(next);
                }
            }

            if resetting {
                if self.current == floor {
                    return Ok(());
                }
                self.current += 1;
            } else {
                if self.current == YEAR {
                    return Err(ScheduleError::OutOfScheduleRange);
                }
                self.current -= 1;
            }
        }
    }

    /// The day digit cannot be assigned blindly: a value the static matcher
    /// admits may not exist in the active month (the 31st in April), so
    /// every candidate is validated against the live month length before it
    /// lands. Returns false to request a carry.
    fn try_setup_day(&mut self, resetting: bool) -> bool {
        if resetting {
            let mut day = self.reset_bound();
            let mut ok = self.matches(day);
            if !ok {
                ok = self.can_advance(day);
                if ok {
                    day = self.advance_from(day);
                    ok = self.calendar.contains_day(day) && self.matches(day);
                }
            }
            if ok {
                self.calendar.day = day;
            }
            ok
        } else {
            let day = self.calendar.day;
            if !self.can_advance(day) {
                return false;
            }
            let next = self.advance_from(day);
            let ok = self.calendar.contains_day(next) && self.matches(next);
            if ok {
                self.calendar.day = next;
            }
            ok
        }
    }
}
