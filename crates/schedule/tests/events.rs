//! Forward and backward nearest-event searches over hand-checked scenarios.

use kairos_calendar::Calendar;
use kairos_schedule::{Schedule, ScheduleError};

fn ts(y: i32, mo: i32, d: i32, h: i32, mi: i32, s: i32, ms: i32) -> i64 {
    Calendar::new(y, mo, d, h, mi, s, ms).unwrap().timestamp()
}

fn check(cases: &[(&str, i64, i64)], search: impl Fn(&Schedule, i64) -> Result<i64, ScheduleError>) {
    for &(schedule, from, expected) in cases {
        let compiled = Schedule::new(schedule).unwrap();
        let actual = search(&compiled, from).unwrap();
        assert_eq!(
            actual,
            expected,
            "schedule '{schedule}' from {:?}: expected {:?}, got {:?}",
            Calendar::from_timestamp(from),
            Calendar::from_timestamp(expected),
            Calendar::from_timestamp(actual),
        );
    }
}

#[test]
fn next_event_steps_one_millisecond() {
    check(
        &[
            ("*.*.* *:*:*.*", ts(2021, 9, 30, 12, 0, 0, 2), ts(2021, 9, 30, 12, 0, 0, 3)),
            ("*.*.* * *:*:*.*", ts(2000, 1, 1, 0, 0, 0, 1), ts(2000, 1, 1, 0, 0, 0, 2)),
            ("*.*.* * *:*:*.*", ts(2099, 12, 31, 23, 59, 59, 999), ts(2100, 1, 1, 0, 0, 0, 0)),
            ("*.*.* * *:*:*.100", ts(2020, 1, 1, 0, 0, 0, 99), ts(2020, 1, 1, 0, 0, 0, 100)),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_day_ranges_to_sentinel() {
    check(
        &[
            ("*.*.20-32 12:00:00", ts(2021, 4, 30, 12, 0, 0, 0), ts(2021, 5, 20, 12, 0, 0, 0)),
            ("*.*.20-32 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 2, 20, 12, 0, 0, 0)),
            ("*.*.20-32 12:00:00", ts(2021, 1, 31, 11, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
            // February is skipped when its tail is too short
            ("*.*.29-32 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 3, 29, 12, 0, 0, 0)),
            ("*.*.29-32 12:00:00", ts(2020, 1, 31, 12, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_last_day_sentinel() {
    check(
        &[
            ("*.*.32 12:00:00", ts(2021, 4, 28, 12, 0, 0, 0), ts(2021, 4, 30, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 4, 29, 12, 0, 0, 0), ts(2021, 4, 30, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 4, 30, 12, 0, 0, 0), ts(2021, 5, 31, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 3, 31, 12, 0, 0, 0), ts(2021, 4, 30, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2020, 1, 31, 12, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 2, 28, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2020, 1, 31, 11, 0, 0, 0), ts(2020, 1, 31, 12, 0, 0, 0)),
            // pinned to February: the last day tracks leap years
            ("*.2.32 12:00:00", ts(2020, 3, 31, 12, 0, 0, 0), ts(2021, 2, 28, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 2, 28, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2021, 3, 31, 12, 0, 0, 0), ts(2022, 2, 28, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2020, 1, 31, 12, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_day_overflow_protection() {
    check(
        &[
            ("*.*.29,30 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 3, 29, 12, 0, 0, 0)),
            ("*.*.30 12:00:00", ts(2021, 2, 4, 12, 0, 0, 0), ts(2021, 3, 30, 12, 0, 0, 0)),
            ("*.*.29 12:00:00", ts(2021, 1, 29, 13, 0, 0, 0), ts(2021, 3, 29, 12, 0, 0, 0)),
            ("*.*.29 12:00:00", ts(2020, 1, 29, 13, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
            ("*.*.31 12:00:00", ts(2021, 1, 31, 12, 0, 0, 1), ts(2021, 3, 31, 12, 0, 0, 0)),
            ("*.*.31 12:00:00", ts(2021, 3, 31, 12, 0, 0, 1), ts(2021, 5, 31, 12, 0, 0, 0)),
            ("*.*.31 12:00:00", ts(2021, 1, 31, 12, 0, 0, 0), ts(2021, 3, 31, 12, 0, 0, 0)),
            ("*.2.4,29,30 12:00:00", ts(2021, 2, 4, 12, 0, 0, 0), ts(2022, 2, 4, 12, 0, 0, 0)),
            ("*.*.4,29,30 12:00:00", ts(2021, 2, 4, 12, 0, 0, 0), ts(2021, 3, 4, 12, 0, 0, 0)),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_time_and_date_defaults() {
    check(
        &[
            ("*.*.01 01:30:00", ts(2020, 12, 31, 13, 30, 0, 0), ts(2021, 1, 1, 1, 30, 0, 0)),
            ("*.*.01 01:30:00", ts(2020, 1, 1, 1, 0, 0, 0), ts(2020, 1, 1, 1, 30, 0, 0)),
            ("*:00:00", ts(2020, 12, 31, 23, 59, 59, 999), ts(2021, 1, 1, 0, 0, 0, 0)),
            ("*:00:00", ts(2020, 1, 1, 0, 0, 0, 0), ts(2020, 1, 1, 1, 0, 0, 0)),
            ("*.*.* * */4:*:*", ts(2020, 1, 1, 0, 0, 0, 0), ts(2020, 1, 1, 0, 0, 1, 0)),
            ("*.*.* * */4:*:*", ts(2020, 12, 31, 21, 0, 0, 0), ts(2021, 1, 1, 0, 0, 0, 0)),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_millisecond_lists() {
    check(
        &[
            (
                "*.*.* * *:*:*.1,2,3-5,10-20/3",
                ts(2020, 12, 31, 23, 59, 59, 20),
                ts(2021, 1, 1, 0, 0, 0, 1),
            ),
            (
                "*.*.* * *:*:*.1,2,3-5,10-20/3",
                ts(2020, 1, 1, 0, 0, 0, 11),
                ts(2020, 1, 1, 0, 0, 0, 13),
            ),
            (
                "*.*.* * *:*:*.3-5,100-600/3",
                ts(2021, 1, 1, 23, 59, 59, 1),
                ts(2021, 1, 1, 23, 59, 59, 3),
            ),
        ],
        Schedule::next_after,
    );
}

#[test]
fn next_event_stepped_years_and_fixed_instants() {
    check(
        &[
            (
                "*/4.01.01 12:00:00.000",
                ts(2012, 1, 1, 12, 0, 0, 1),
                ts(2016, 1, 1, 12, 0, 0, 0),
            ),
            // the far end of the supported range, a single fixed instant
            (
                "2100.12.31 23:59:59.999",
                ts(2000, 1, 1, 0, 0, 0, 0),
                ts(2100, 12, 31, 23, 59, 59, 999),
            ),
            (
                "*.4.6,7 * *:*:*.1,2,3-5,10-20/3",
                ts(2001, 1, 1, 0, 0, 0, 0),
                ts(2001, 4, 6, 0, 0, 0, 1),
            ),
        ],
        Schedule::next_after,
    );
}

#[test]
fn prev_event_mirrors_next() {
    check(
        &[
            ("*.*.20-32 12:00:00", ts(2021, 5, 20, 12, 0, 0, 0), ts(2021, 4, 30, 12, 0, 0, 0)),
            ("*.*.20-32 12:00:00", ts(2021, 2, 20, 12, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
            ("*.*.20-32 12:00:00", ts(2021, 1, 31, 13, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
            ("*.*.29-32 12:00:00", ts(2021, 3, 29, 12, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
            ("*.*.29-32 12:00:00", ts(2020, 2, 29, 12, 0, 0, 0), ts(2020, 1, 31, 12, 0, 0, 0)),
            ("2021.2.4,29,30 12:00:00", ts(2021, 3, 29, 12, 0, 0, 0), ts(2021, 2, 4, 12, 0, 0, 0)),
            ("2021.*.4,29,30 12:00:00", ts(2021, 3, 3, 12, 0, 0, 0), ts(2021, 2, 4, 12, 0, 0, 0)),
            ("*.*.31 12:00:00", ts(2021, 3, 30, 12, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
        ],
        Schedule::prev_before,
    );
}

#[test]
fn prev_event_last_day_sentinel() {
    check(
        &[
            ("*.*.32 12:00:00", ts(2021, 5, 31, 12, 0, 0, 0), ts(2021, 4, 30, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 4, 30, 12, 0, 0, 0), ts(2021, 3, 31, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2021, 2, 28, 12, 0, 0, 0), ts(2021, 1, 31, 12, 0, 0, 0)),
            ("*.*.32 12:00:00", ts(2020, 1, 31, 13, 0, 0, 0), ts(2020, 1, 31, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2021, 2, 28, 12, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2021, 2, 27, 12, 0, 0, 0), ts(2020, 2, 29, 12, 0, 0, 0)),
            ("*.2.32 12:00:00", ts(2022, 2, 28, 12, 0, 0, 0), ts(2021, 2, 28, 12, 0, 0, 0)),
            ("*.*.01 01:30:00", ts(2021, 1, 1, 1, 30, 0, 0), ts(2020, 12, 1, 1, 30, 0, 0)),
            ("*.*.01 01:30:00", ts(2020, 1, 1, 1, 50, 0, 0), ts(2020, 1, 1, 1, 30, 0, 0)),
            ("*:00:00", ts(2021, 1, 1, 0, 0, 0, 0), ts(2020, 12, 31, 23, 0, 0, 0)),
            ("*:00:00", ts(2020, 1, 1, 1, 0, 0, 0), ts(2020, 1, 1, 0, 0, 0, 0)),
        ],
        Schedule::prev_before,
    );
}

#[test]
fn nearest_includes_the_instant_itself() {
    let schedule = Schedule::new("*.*.* 12:00:00").unwrap();
    let noon = ts(2021, 6, 15, 12, 0, 0, 0);
    assert_eq!(schedule.nearest_at_or_after(noon).unwrap(), noon);
    assert_eq!(schedule.nearest_at_or_before(noon).unwrap(), noon);
    // strict variants step over it
    assert_eq!(
        schedule.next_after(noon).unwrap(),
        ts(2021, 6, 16, 12, 0, 0, 0)
    );
    assert_eq!(
        schedule.prev_before(noon).unwrap(),
        ts(2021, 6, 14, 12, 0, 0, 0)
    );
}

#[test]
fn out_of_range_after_the_last_instant() {
    let schedule = Schedule::new("2100.12.31 23:59:59.999").unwrap();
    let last = ts(2100, 12, 31, 23, 59, 59, 999);
    assert_eq!(schedule.nearest_at_or_after(last).unwrap(), last);
    // one millisecond past the fixed instant there is nothing left
    assert_eq!(
        schedule.next_after(last).unwrap_err(),
        ScheduleError::OutOfScheduleRange
    );
    assert_eq!(
        schedule.nearest_at_or_after(last + 1).unwrap_err(),
        ScheduleError::OutOfScheduleRange
    );
}

#[test]
fn out_of_range_backward_before_the_first_instant() {
    let schedule = Schedule::new("2021.6.15 12:00:00").unwrap();
    let event = ts(2021, 6, 15, 12, 0, 0, 0);
    assert_eq!(
        schedule.prev_before(event).unwrap_err(),
        ScheduleError::OutOfScheduleRange
    );
    assert_eq!(schedule.prev_before(event + 1).unwrap(), event);
}

#[test]
fn searches_clamp_from_outside_the_supported_years() {
    let schedule = Schedule::new("*.1.1 00:00:00").unwrap();
    // a start before 2000 clamps forward to the range start
    let before_range = ts(2000, 1, 1, 0, 0, 0, 0) - 1;
    assert_eq!(
        schedule.nearest_at_or_after(before_range).unwrap(),
        ts(2000, 1, 1, 0, 0, 0, 0)
    );
    // and going backward from there is out of range
    assert_eq!(
        schedule.prev_before(before_range).unwrap_err(),
        ScheduleError::OutOfScheduleRange
    );
}
