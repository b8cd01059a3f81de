//! Next command: list scheduled events nearest to a start instant.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use kairos_schedule::{Schedule, ScheduleError};

use crate::cli::NextArgs;
use crate::convert;

#[derive(Serialize)]
struct EventsReport<'a> {
    schedule: &'a str,
    from: String,
    backward: bool,
    events: Vec<String>,
    exhausted: bool,
}

/// Run the event listing.
pub fn run(args: NextArgs) -> Result<()> {
    let _cmd = info_span!("next").entered();

    let schedule = Schedule::new(&args.schedule)
        .with_context(|| format!("invalid schedule '{}'", args.schedule))?;

    let from = match &args.from {
        Some(text) => convert::parse_datetime(text)
            .with_context(|| format!("invalid start instant '{text}'"))?,
        None => convert::now_millis(),
    };
    info!(from = %convert::format_timestamp(from), backward = args.backward, "searching");

    let mut events = Vec::with_capacity(args.count);
    let mut exhausted = false;

    if args.count > 0 {
        let first = if args.inclusive {
            if args.backward {
                schedule.nearest_at_or_before(from)
            } else {
                schedule.nearest_at_or_after(from)
            }
        } else if args.backward {
            schedule.prev_before(from)
        } else {
            schedule.next_after(from)
        };

        match first {
            Ok(timestamp) => {
                events.push(timestamp);
                if events.len() < args.count {
                    // the generator opens strictly past its start, so its
                    // first event follows the one already collected
                    match schedule.generator(timestamp, !args.backward) {
                        Ok(mut generator) => {
                            events.push(generator.last());
                            while events.len() < args.count {
                                match generator.next() {
                                    Ok(timestamp) => events.push(timestamp),
                                    Err(ScheduleError::OutOfScheduleRange) => {
                                        exhausted = true;
                                        break;
                                    }
                                    Err(e) => return Err(e.into()),
                                }
                            }
                        }
                        Err(ScheduleError::OutOfScheduleRange) => exhausted = true,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            Err(ScheduleError::OutOfScheduleRange) => exhausted = true,
            Err(e) => return Err(e.into()),
        }
    }

    let formatted: Vec<String> = events.iter().copied().map(convert::format_timestamp).collect();

    if args.json {
        let report = EventsReport {
            schedule: schedule.text(),
            from: convert::format_timestamp(from),
            backward: args.backward,
            events: formatted,
            exhausted,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in &formatted {
            println!("{line}");
        }
        if exhausted {
            eprintln!("(schedule exhausted after {} events)", formatted.len());
        }
    }

    Ok(())
}
