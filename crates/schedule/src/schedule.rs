//! Schedule compilation and nearest-event search.

use std::fmt;
use std::str::FromStr;

use kairos_calendar::{Calendar, WeekdayMap, leap_year};
use tracing::{debug, trace};

use crate::digits::CalendarDigits;
use crate::error::ScheduleError;
use crate::generator::EventsGenerator;
use crate::model::ScheduleModel;
use crate::parse;
use crate::pool::MatcherPool;

/// Search direction over the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Whether the start instant itself may be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Equality {
    OrEqual,
    Strict,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchMode {
    direction: Direction,
    equality: Equality,
}

impl SearchMode {
    pub(crate) fn to_zero(self) -> bool {
        self.direction == Direction::Forward
    }

    fn can_equal(self) -> bool {
        self.equality == Equality::OrEqual
    }
}

/// A compiled event schedule with millisecond resolution.
///
/// Compilation builds one matcher per calendar field plus the weekday maps;
/// every lookup afterwards reuses them without further allocation. A compiled
/// schedule is immutable and can serve any number of concurrent searches.
///
/// # Example
///
/// ```
/// use kairos_calendar::Calendar;
/// use kairos_schedule::Schedule;
///
/// // noon on the last day of every month
/// let schedule = Schedule::new("*.*.32 12:00:00").unwrap();
///
/// let start = Calendar::new(2021, 4, 28, 12, 0, 0, 0).unwrap().timestamp();
/// let event = schedule.next_after(start).unwrap();
/// let found = Calendar::from_timestamp(event);
/// assert_eq!((found.month, found.day, found.hour), (4, 30, 12));
/// ```
pub struct Schedule {
    text: String,
    pool: MatcherPool,
}

impl Schedule {
    /// Compiles a schedule expression.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the expression does not parse, fails
    /// validation, or pins February 29 without selecting any leap year.
    pub fn new(text: &str) -> Result<Self, ScheduleError> {
        let model = parse::parse(text)?;
        let pool = MatcherPool::new(&model)?;
        debug!(schedule = %text, "schedule compiled");
        Ok(Self {
            text: text.to_string(),
            pool,
        })
    }

    /// Compiles a programmatically built model. Missing fields receive the
    /// documented defaults before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the model fails validation.
    pub fn from_model(mut model: ScheduleModel) -> Result<Self, ScheduleError> {
        model.apply_defaults();
        model.validate()?;
        let pool = MatcherPool::new(&model)?;
        Ok(Self {
            text: model.to_string(),
            pool,
        })
    }

    /// The source expression (or the canonical form of a built model).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn pool(&self) -> &MatcherPool {
        &self.pool
    }

    /// The nearest scheduled instant at or after `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if no such instant
    /// exists within the supported years.
    pub fn nearest_at_or_after(&self, timestamp: i64) -> Result<i64, ScheduleError> {
        self.find_event(
            timestamp,
            SearchMode {
                direction: Direction::Forward,
                equality: Equality::OrEqual,
            },
        )
    }

    /// The nearest scheduled instant at or before `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if no such instant
    /// exists within the supported years.
    pub fn nearest_at_or_before(&self, timestamp: i64) -> Result<i64, ScheduleError> {
        self.find_event(
            timestamp,
            SearchMode {
                direction: Direction::Backward,
                equality: Equality::OrEqual,
            },
        )
    }

    /// The first scheduled instant strictly after `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if no such instant
    /// exists within the supported years.
    pub fn next_after(&self, timestamp: i64) -> Result<i64, ScheduleError> {
        self.find_event(
            timestamp,
            SearchMode {
                direction: Direction::Forward,
                equality: Equality::Strict,
            },
        )
    }

    /// The last scheduled instant strictly before `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if no such instant
    /// exists within the supported years.
    pub fn prev_before(&self, timestamp: i64) -> Result<i64, ScheduleError> {
        self.find_event(
            timestamp,
            SearchMode {
                direction: Direction::Backward,
                equality: Equality::Strict,
            },
        )
    }

    /// Opens a serial generator producing successive events from `start`
    /// (exclusive) in the given direction, reusing one cursor across calls.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::OutOfScheduleRange`] if not even a first
    /// event exists.
    pub fn generator(&self, start: i64, forward: bool) -> Result<EventsGenerator<'_>, ScheduleError> {
        EventsGenerator::open(self, start, forward)
    }

    /// One lookup: at most one bounded pass over the digits plus the weekday
    /// correction.
    fn find_event(&self, timestamp: i64, mode: SearchMode) -> Result<i64, ScheduleError> {
        let calendar = Calendar::from_timestamp(timestamp);
        let mut digits = CalendarDigits::new(&self.pool, calendar, mode.to_zero());
        run_search(&self.pool, &mut digits, mode.can_equal())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schedule::new(s)
    }
}

/// Walks the digits to a fully determined instant, then applies the weekday
/// constraint.
pub(crate) fn run_search(
    pool: &MatcherPool,
    digits: &mut CalendarDigits<'_>,
    can_equal: bool,
) -> Result<i64, ScheduleError> {
    while search_down(digits, can_equal)? {}
    fix_week_day(pool, digits)
}

/// One step of the search: settle the active digit, or descend into the next
/// one. Returns true to keep descending.
fn search_down(digits: &mut CalendarDigits<'_>, can_equal: bool) -> Result<bool, ScheduleError> {
    let value = digits.value();

    if digits.is_before_range(value) {
        // everything from here down resets to its boundary; the instant is
        // fully determined
        digits.initialize()?;
        return Ok(false);
    }

    if digits.is_beyond_range(value) {
        // overflow: carry into the more significant digit
        digits.retreat()?;
        digits.increment()?;
        return Ok(false);
    }

    if digits.matches(value) && digits.calendar().day_is_valid() {
        if !digits.is_last() {
            digits.descend();
            return Ok(true);
        }
        if can_equal {
            return Ok(false);
        }
    }

    digits.increment()?;
    Ok(false)
}

/// Applies the day-of-week constraint to a date the digit walk settled on,
/// relocating to the nearest qualifying date if needed and reinitializing the
/// time digits.
pub(crate) fn fix_week_day(
    pool: &MatcherPool,
    digits: &mut CalendarDigits<'_>,
) -> Result<i64, ScheduleError> {
    let week = pool.week_map();
    if !week.is_full() && !week.contains(digits.calendar().day_of_week()) {
        find_best_date(pool, digits, week)?;
        digits.goto_hour();
        digits.initialize()?;
    }
    Ok(digits.calendar().timestamp())
}

/// Relocates to the nearest date whose weekday is selected, widening the
/// search from days to months to years.
///
/// Relocation and the schedule's own date constraints interact: `reset_date`
/// can overflow into a different month or year than the one just chosen
/// (day-of-month ranges may not exist there), and that month may again lack a
/// matching weekday. The loop repeats until both constraints agree, which
/// takes a handful of iterations at most.
fn find_best_date(
    pool: &MatcherPool,
    digits: &mut CalendarDigits<'_>,
    week: WeekdayMap,
) -> Result<(), ScheduleError> {
    loop {
        if find_best_day(digits, week) {
            return Ok(());
        }
        if !find_best_month(pool, digits, week, false)? {
            find_best_year(pool, digits, week)?;
            find_best_month(pool, digits, week, true)?;
        }
        trace!(
            year = digits.calendar().year,
            month = digits.calendar().month,
            "weekday correction relocated, revalidating"
        );
    }
}

/// Searches the current month for a day on a selected weekday, rotating a
/// single-bit map along with each day advance instead of recomputing the
/// weekday per candidate.
fn find_best_day(digits: &mut CalendarDigits<'_>, week: WeekdayMap) -> bool {
    let mut day = digits.calendar().day;
    let mut map = WeekdayMap::of_weekday(digits.calendar().day_of_week());

    digits.goto_day();
    while !week.intersects(map) {
        if !digits.can_advance(day) {
            return false;
        }
        let next = digits.advance_from(day);
        let shift = if digits.to_zero() {
            next - day
        } else {
            // rolling left by the 7-complement rotates right
            7 - (day - next) % 7
        };
        map = map.rotated(shift);
        day = next;
    }

    digits.calendar_mut().day = day;
    true
}

/// Searches the scheduled months of the current year for one containing any
/// day on a selected weekday, by bitmap intersection. With
/// `test_current_first` the month under the cursor is tested before
/// advancing (used after a year relocation, where the search restarts at the
/// year's boundary month); without it the current month is already known to
/// be exhausted and the search advances immediately.
fn find_best_month(
    pool: &MatcherPool,
    digits: &mut CalendarDigits<'_>,
    week: WeekdayMap,
    test_current_first: bool,
) -> Result<bool, ScheduleError> {
    let leap = digits.calendar().is_leap();
    let mut month = digits.calendar().month;
    let january = pool.month_days_map().for_year(digits.calendar().year);
    let mut map = january.for_month(month, leap);
    let mut test_current = test_current_first;

    digits.goto_month();
    while !(test_current && week.intersects(map)) {
        if !digits.can_advance(month) {
            return Ok(false);
        }
        month = digits.advance_from(month);
        map = january.for_month(month, leap);
        test_current = true;
    }

    digits.calendar_mut().month = month;
    digits.goto_day();
    // may itself move to another month or year; the caller's loop revalidates
    digits.reset_date()?;
    Ok(true)
}

/// Searches the scheduled years for one containing any day on a selected
/// weekday, by bitmap intersection over the year-level maps.
fn find_best_year(
    pool: &MatcherPool,
    digits: &mut CalendarDigits<'_>,
    week: WeekdayMap,
) -> Result<(), ScheduleError> {
    let mut year = digits.calendar().year;

    digits.goto_year();
    loop {
        if !digits.can_advance(year) {
            // the year bound is exhausted
            return Err(ScheduleError::OutOfScheduleRange);
        }
        year = digits.advance_from(year);
        let base = if leap_year(year) {
            pool.leap_year_map()
        } else {
            pool.normal_year_map()
        };
        if week.intersects(base.for_year(year)) {
            break;
        }
    }

    digits.calendar_mut().year = year;
    digits.goto_month();
    // may land in a different year; the caller's loop revalidates
    digits.reset_date()?;
    Ok(())
}
