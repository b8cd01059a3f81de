//! Day-of-month decorator that clamps a matcher to the actual month length.

use crate::digit::{DigitMatcher, Matcher};

/// Reserved day-of-month value meaning "the month's actual last day".
pub const LAST_DAY_OF_MONTH: i32 = 32;

/// Decorator for the day-of-month digit.
///
/// The configured day matcher is static, but the real upper bound moves with
/// the month under the cursor: "31" is legal in May but not in April, and the
/// sentinel day [`LAST_DAY_OF_MONTH`] means whatever the current month's last
/// day is. The proxy is rebuilt for every query with the live month length
/// and clamps membership, stepping, and bounds against it while delegating
/// the underlying bit pattern to the wrapped matcher.
#[derive(Debug, Clone, Copy)]
pub struct LastDayProxy<'a> {
    inner: &'a Matcher,
    last_day: i32,
}

impl<'a> LastDayProxy<'a> {
    /// Wraps `inner` with the actual last day of the month under the cursor.
    pub fn new(inner: &'a Matcher, last_day: i32) -> Self {
        Self { inner, last_day }
    }

    /// Returns true if the static day matcher needs this proxy at all: any
    /// configured upper bound past 28 can overflow some month.
    pub fn required(inner: &Matcher) -> bool {
        let min = inner.low();
        let max = inner.high();
        !(min <= max && max < 29)
    }

    fn is_sentinel_only(&self) -> bool {
        self.inner.low() == self.inner.high() && self.inner.high() == LAST_DAY_OF_MONTH
    }
}

impl DigitMatcher for LastDayProxy<'_> {
    fn matches(&self, value: i32) -> bool {
        if self.is_sentinel_only() {
            return value == self.last_day;
        }
        let max = self.inner.high().min(self.last_day);
        self.inner.low() <= value && value <= max && self.inner.matches(value)
    }

    fn is_above(&self, value: i32) -> bool {
        value > self.high()
    }

    fn is_below(&self, value: i32) -> bool {
        value < self.low()
    }

    fn next(&self, value: i32) -> i32 {
        if value < self.high() {
            let next = self.inner.next(value);
            // the configured value may overflow the month; the overflow case
            // means "take the month's actual last day"
            if next < self.last_day { next } else { self.last_day }
        } else {
            // overflow for any month
            LAST_DAY_OF_MONTH
        }
    }

    fn prev(&self, value: i32) -> i32 {
        if value > self.low() {
            let mut v = self.inner.prev(value);
            while v > self.last_day {
                v = self.inner.prev(v);
            }
            v
        } else {
            // underflow for any month
            -1
        }
    }

    fn has_next(&self, value: i32) -> bool {
        value < self.high() && self.matches(self.next(value))
    }

    fn has_prev(&self, value: i32) -> bool {
        value > self.low() && self.matches(self.prev(value))
    }

    fn low(&self) -> i32 {
        self.inner.low().min(self.last_day)
    }

    fn high(&self) -> i32 {
        self.inner.high().min(self.last_day)
    }
}
