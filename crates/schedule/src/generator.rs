//! Serial event generation over one persistent cursor.

use kairos_calendar::Calendar;

use crate::digits::CalendarDigits;
use crate::error::ScheduleError;
use crate::schedule::{Schedule, fix_week_day, run_search};

/// A serial generator of scheduled events.
///
/// Opening the generator performs one full search from the start instant;
/// every [`next`](EventsGenerator::next) afterwards advances the
/// least-significant digit of the same cursor and reapplies the weekday
/// correction, so tight iteration re-derives nothing and allocates nothing.
///
/// Mutable and single-owner: share a generator between callers only behind
/// external synchronization.
///
/// # Example
///
/// ```
/// use kairos_calendar::Calendar;
/// use kairos_schedule::Schedule;
///
/// let schedule = Schedule::new("*:00:00").unwrap();
/// let start = Calendar::new(2021, 1, 1, 10, 30, 0, 0).unwrap().timestamp();
///
/// let mut events = schedule.generator(start, true).unwrap();
/// let first = events.last();
/// assert_eq!(events.next().unwrap() - first, 3_600_000);
/// ```
pub struct EventsGenerator<'a> {
    schedule: &'a Schedule,
    digits: CalendarDigits<'a>,
    last: i64,
}

impl<'a> EventsGenerator<'a> {
    pub(crate) fn open(
        schedule: &'a Schedule,
        start: i64,
        forward: bool,
    ) -> Result<Self, ScheduleError> {
        let calendar = Calendar::from_timestamp(start);
        let mut digits = CalendarDigits::new(schedule.pool(), calendar, forward);
        let last = run_search(schedule.pool(), &mut digits, false)?;
        Ok(Self {
            schedule,
            digits,
            last,
        })
    }

    /// The most recently produced event.
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Produces the next event in the generator's direction.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] once the schedule is
    /// exhausted; the generator is unusable afterwards.
    pub fn next(&mut self) -> Result<i64, ScheduleError> {
        self.digits.goto_last();
        self.digits.increment()?;
        self.last = fix_week_day(self.schedule.pool(), &mut self.digits)?;
        Ok(self.last)
    }

    /// The source expression of the generating schedule.
    pub fn schedule_text(&self) -> &str {
        self.schedule.text()
    }
}
