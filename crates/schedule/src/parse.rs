//! Parser for the textual schedule grammar.
//!
//! ```text
//! yyyy.MM.dd w HH:mm:ss.fff    date, weekday, time with milliseconds
//! yyyy.MM.dd HH:mm:ss.fff      date and time
//! HH:mm:ss.fff                 time only
//! HH:mm:ss                     time only, milliseconds default to 0
//! ```
//!
//! Each element is a comma list of `*`, `*/n`, `a`, `a-b`, or `a-b/n`.
//! The day of month admits 32 for "last day of the month".

use kairos_matcher::{Range, RangeSet};

use crate::error::ScheduleError;
use crate::model::{ScheduleField, ScheduleModel};

/// Parses a schedule expression into a validated model with defaults applied.
pub(crate) fn parse(text: &str) -> Result<ScheduleModel, ScheduleError> {
    if text.trim().is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }

    let mut model = ScheduleModel::new();

    for part in text.split_whitespace() {
        if is_date(part) {
            if model.has_time() || model.has_date() {
                return Err(ScheduleError::MisplacedDate);
            }
            parse_date(&mut model, part)?;
        } else if is_time(part) {
            if model.has_time() {
                return Err(ScheduleError::RedundantTime);
            }
            parse_time(&mut model, part)?;
        } else {
            if !model.has_date() || model.has_time() || model.has_weekday() {
                return Err(ScheduleError::MisplacedWeekday);
            }
            model.set(ScheduleField::DayOfWeek, parse_ranges(part)?);
        }
    }

    if !model.has_time() {
        return Err(ScheduleError::MissingTime);
    }

    model.apply_defaults();
    model.validate()?;
    Ok(model)
}

fn is_date(part: &str) -> bool {
    part.contains('.') && !part.contains(':')
}

fn is_time(part: &str) -> bool {
    part.contains(':')
}

fn parse_date(model: &mut ScheduleModel, part: &str) -> Result<(), ScheduleError> {
    let elements: Vec<&str> = part.split('.').collect();
    let [year, month, day] = elements[..] else {
        return Err(ScheduleError::MalformedDate { part: part.into() });
    };
    model.set(ScheduleField::Year, parse_ranges(year)?);
    model.set(ScheduleField::Month, parse_ranges(month)?);
    model.set(ScheduleField::DayOfMonth, parse_ranges(day)?);
    Ok(())
}

fn parse_time(model: &mut ScheduleModel, part: &str) -> Result<(), ScheduleError> {
    let elements: Vec<&str> = part.split(':').collect();
    let [hour, minute, rest] = elements[..] else {
        return Err(ScheduleError::MalformedTime { part: part.into() });
    };
    model.set(ScheduleField::Hour, parse_ranges(hour)?);
    model.set(ScheduleField::Minute, parse_ranges(minute)?);

    if let Some((second, milli)) = rest.split_once('.') {
        model.set(ScheduleField::Second, parse_ranges(second)?);
        model.set(ScheduleField::Milli, parse_ranges(milli)?);
    } else {
        model.set(ScheduleField::Second, parse_ranges(rest)?);
    }
    Ok(())
}

fn parse_ranges(text: &str) -> Result<RangeSet, ScheduleError> {
    let ranges: Vec<Range> = text
        .split(',')
        .map(parse_range)
        .collect::<Result<_, _>>()?;
    Ok(RangeSet::new(ranges))
}

/// Parses a single range element: `*`, `*/n`, `a`, `a-b`, or `a-b/n`.
fn parse_range(text: &str) -> Result<Range, ScheduleError> {
    if let Some(rest) = text.strip_prefix('*') {
        if rest.is_empty() {
            return Ok(Range::any());
        }
        let Some(step) = rest.strip_prefix('/') else {
            return Err(ScheduleError::MalformedRange { text: text.into() });
        };
        let step = parse_number(step)?;
        return Ok(if step == 1 {
            Range::any()
        } else {
            Range::any_step(step)
        });
    }

    let (span, step) = match text.split_once('/') {
        Some((span, step)) => (span, Some(parse_number(step)?)),
        None => (text, None),
    };

    if let Some((min, max)) = span.split_once('-') {
        let min = parse_number(min)?;
        let max = parse_number(max)?;
        return Ok(match step {
            Some(step) => Range::stepped(min, max, step),
            None => Range::span(min, max),
        });
    }

    if step.is_some() {
        // a stride on a single constant is meaningless
        return Err(ScheduleError::MalformedRange { text: text.into() });
    }
    Ok(Range::value(parse_number(span)?))
}

fn parse_number(text: &str) -> Result<i32, ScheduleError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScheduleError::InvalidNumber { text: text.into() });
    }
    text.parse()
        .map_err(|_| ScheduleError::InvalidNumber { text: text.into() })
}
