//! Check command: validate a schedule expression.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info_span;

use kairos_schedule::Schedule;

use crate::cli::CheckArgs;

#[derive(Serialize)]
struct CheckReport<'a> {
    schedule: &'a str,
    valid: bool,
}

/// Run the schedule validation.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    let schedule = Schedule::new(&args.schedule)
        .with_context(|| format!("invalid schedule '{}'", args.schedule))?;

    if args.json {
        let report = CheckReport {
            schedule: schedule.text(),
            valid: true,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("ok: {}", schedule.text());
    }

    Ok(())
}
