//! # kairos-calendar
//!
//! Restricted Gregorian calendar arithmetic for the [2000, 2100] range.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["timestamp (ms)"] -->|"Calendar::from_timestamp()"| B["Calendar"]
//!     B -->|".timestamp()"| A
//!     B -->|".day_of_week()"| C["weekday 0..=6"]
//!     D["WeekdayMap"] -->|".for_year() / .for_month()"| D
//!     D -->|".intersects()"| E["month/year weekday test"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use kairos_calendar::{Calendar, WeekdayMap, days_in_month};
//!
//! let cal = Calendar::new(2021, 9, 30, 12, 0, 0, 2).unwrap();
//! let back = Calendar::from_timestamp(cal.timestamp());
//! assert_eq!(back, cal);
//!
//! assert_eq!(days_in_month(2020, 2), 29);
//!
//! // 2021-09-30 was a Thursday
//! let mut saturdays = WeekdayMap::EMPTY;
//! saturdays.add_weekday(6);
//! assert_eq!(cal.day_of_week(), 4);
//! assert!(!saturdays.contains(cal.day_of_week()));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `gregorian` | Calendar record and millisecond timestamp codec |
//! | `weekday` | 7-bit weekday maps with month/year rotation |
//! | `error` | Error types |

mod error;
mod gregorian;
mod weekday;

pub use error::CalendarError;
pub use gregorian::{
    Calendar, DateField, MAX_YEAR, MILLIS_PER_DAY, MIN_YEAR, days_in_month, leap_year,
};
pub use weekday::WeekdayMap;
