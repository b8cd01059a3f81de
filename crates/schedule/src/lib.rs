//! # kairos-schedule
//!
//! Millisecond-resolution event schedules over the years 2000–2100: compile
//! a per-field schedule expression once, then find the nearest matching
//! instant at/after or at/before any timestamp, or stream successive events
//! through a generator.
//!
//! ```text
//! yyyy.MM.dd w HH:mm:ss.fff    date, weekday, time with milliseconds
//! yyyy.MM.dd HH:mm:ss.fff      date and time
//! HH:mm:ss.fff                 time only (date defaults to *.*.*)
//! HH:mm:ss                     milliseconds default to 0
//! ```
//!
//! Each element is a comma list of `*`, `*/n`, `a`, `a-b`, `a-b/n`. Day of
//! month 32 means the last day of the month; weekdays run 0 (Sunday) to 6
//! (Saturday).
//!
//! # Quick start
//!
//! ```
//! use kairos_calendar::Calendar;
//! use kairos_schedule::Schedule;
//!
//! // 10:00 on workday odd days of September
//! let schedule = Schedule::new("*.9.*/2 1-5 10:00:00.000").unwrap();
//!
//! let from = Calendar::new(2021, 1, 1, 0, 0, 0, 0).unwrap().timestamp();
//! let event = Calendar::from_timestamp(schedule.nearest_at_or_after(from).unwrap());
//! assert_eq!((event.month, event.hour), (9, 10));
//! ```
//!
//! # Architecture
//!
//! ```text
//! Schedule::new()
//!   ├─ parse / validate          (parse.rs, model.rs)
//!   ├─ MatcherPool               (pool.rs — one matcher per field,
//!   │                             weekday maps for the day-of-week rule)
//!   └─ searches
//!        ├─ CalendarDigits       (digits.rs — odometer cascade)
//!        ├─ search + weekday fix (schedule.rs)
//!        └─ EventsGenerator      (generator.rs)
//! ```
//!
//! A compiled [`Schedule`] is immutable and serves concurrent lookups; each
//! lookup owns its own transient cursor. Every operation is bounded by the
//! seven-digit cascade plus a small number of weekday-correction rounds, so
//! lookups run in near-constant time regardless of the distance searched.

mod digits;
mod error;
mod generator;
mod model;
mod parse;
mod pool;
mod schedule;

pub use error::ScheduleError;
pub use generator::EventsGenerator;
pub use kairos_matcher::{Range, RangeSet};
pub use model::{ScheduleField, ScheduleModel};
pub use schedule::Schedule;
