//! Serial generation and the algebraic properties of the search.

use kairos_calendar::Calendar;
use kairos_schedule::{Schedule, ScheduleError};

fn ts(y: i32, mo: i32, d: i32, h: i32, mi: i32, s: i32, ms: i32) -> i64 {
    Calendar::new(y, mo, d, h, mi, s, ms).unwrap().timestamp()
}

#[test]
fn generator_matches_iterated_next_after() {
    let schedules = [
        "*.*.* * *:*:*.1,2,3-5,10-20/3",
        "*.*.32 12:00:00",
        "*.9.*/2 1-5 10:00:00.000",
        "*:30:00",
    ];
    for text in schedules {
        let schedule = Schedule::new(text).unwrap();
        let start = ts(2021, 8, 30, 22, 59, 59, 18);

        let mut generator = schedule.generator(start, true).unwrap();
        let mut expected = start;
        for i in 0..200 {
            expected = schedule.next_after(expected).unwrap();
            let actual = if i == 0 {
                generator.last()
            } else {
                generator.next().unwrap()
            };
            assert_eq!(actual, expected, "schedule '{text}', event {i}");
        }
    }
}

#[test]
fn generator_runs_backward() {
    let schedule = Schedule::new("*.*.* 12:00:00").unwrap();
    let start = ts(2021, 6, 15, 12, 0, 0, 0);

    let mut generator = schedule.generator(start, false).unwrap();
    assert_eq!(generator.last(), ts(2021, 6, 14, 12, 0, 0, 0));
    assert_eq!(generator.next().unwrap(), ts(2021, 6, 13, 12, 0, 0, 0));
    assert_eq!(generator.next().unwrap(), ts(2021, 6, 12, 12, 0, 0, 0));
}

#[test]
fn generator_reports_exhaustion() {
    let schedule = Schedule::new("2021.12.31 23:59:59.999").unwrap();
    let generator = schedule.generator(ts(2021, 12, 31, 23, 59, 59, 999), true);
    assert!(matches!(generator, Err(ScheduleError::OutOfScheduleRange)));

    let mut generator = schedule
        .generator(ts(2021, 12, 31, 23, 59, 59, 998), true)
        .unwrap();
    assert_eq!(generator.last(), ts(2021, 12, 31, 23, 59, 59, 999));
    assert_eq!(
        generator.next().unwrap_err(),
        ScheduleError::OutOfScheduleRange
    );
}

#[test]
fn generator_keeps_the_schedule_text() {
    let schedule = Schedule::new("*:00:00").unwrap();
    let generator = schedule.generator(ts(2021, 1, 1, 0, 0, 0, 0), true).unwrap();
    assert_eq!(generator.schedule_text(), "*:00:00");
}

#[test]
fn nearest_is_idempotent() {
    let schedules = ["*.*.* * */4:*:*", "*.*.32 12:00:00", "*.*.* 5 08:15:00"];
    for text in schedules {
        let schedule = Schedule::new(text).unwrap();
        let mut t = ts(2021, 2, 27, 3, 4, 5, 6);
        for _ in 0..50 {
            let event = schedule.nearest_at_or_after(t).unwrap();
            assert_eq!(
                schedule.nearest_at_or_after(event).unwrap(),
                event,
                "schedule '{text}'"
            );
            t = event + 1;
        }
    }
}

#[test]
fn nearest_is_monotonic() {
    let schedule = Schedule::new("*.*.29,30 1-5 12:00:00").unwrap();
    let base = ts(2021, 1, 1, 0, 0, 0, 0);
    let step = 11 * 3_600_000 + 1234;

    let mut previous = schedule.nearest_at_or_after(base).unwrap();
    for i in 1..300 {
        let t = base + i * step;
        let event = schedule.nearest_at_or_after(t).unwrap();
        assert!(event >= t);
        assert!(
            event >= previous,
            "monotonicity violated at offset {i}: {event} < {previous}"
        );
        previous = event;
    }
}

#[test]
fn forward_and_backward_are_inverse_on_events() {
    let schedule = Schedule::new("*.*.20-32/3 10:20:30.400").unwrap();
    let mut t = ts(2021, 1, 1, 0, 0, 0, 0);
    for _ in 0..40 {
        let event = schedule.next_after(t).unwrap();
        assert_eq!(schedule.nearest_at_or_before(event).unwrap(), event);
        let back = schedule.prev_before(event).unwrap();
        assert!(back < event);
        assert_eq!(schedule.next_after(back).unwrap(), event);
        t = event;
    }
}
