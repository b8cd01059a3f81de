//! Pure conversion functions: datetime text <-> epoch-millisecond timestamps.
//!
//! The schedule engine works on zone-agnostic integer timestamps; this module
//! is the CLI-side converter for human-readable instants, treated as UTC.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use kairos_calendar::Calendar;

/// Parses "YYYY-MM-DD HH:MM:SS[.mmm]" (a 'T' separator also works) into an
/// epoch-millisecond timestamp.
pub fn parse_datetime(text: &str) -> Result<i64> {
    let text = text.trim();
    let (date, time) = text
        .split_once([' ', 'T'])
        .with_context(|| format!("expected 'YYYY-MM-DD HH:MM:SS[.mmm]', got '{text}'"))?;

    let date_parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = date_parts[..] else {
        bail!("malformed date '{date}' (expected YYYY-MM-DD)");
    };

    let (time, millis) = match time.split_once('.') {
        Some((hms, frac)) => (hms, parse_millis(frac)?),
        None => (time, 0),
    };
    let time_parts: Vec<&str> = time.split(':').collect();
    let [hour, minute, second] = time_parts[..] else {
        bail!("malformed time '{time}' (expected HH:MM:SS)");
    };

    let calendar = Calendar::new(
        parse_component(year)?,
        parse_component(month)?,
        parse_component(day)?,
        parse_component(hour)?,
        parse_component(minute)?,
        parse_component(second)?,
        millis,
    )?;
    Ok(calendar.timestamp())
}

/// Formats an epoch-millisecond timestamp as "YYYY-MM-DD HH:MM:SS.mmm".
pub fn format_timestamp(timestamp: i64) -> String {
    let c = Calendar::from_timestamp(timestamp);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
        c.year, c.month, c.day, c.hour, c.minute, c.second, c.millisecond
    )
}

/// The current instant in epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}

fn parse_component(text: &str) -> Result<i32> {
    text.parse()
        .with_context(|| format!("invalid number '{text}'"))
}

/// Fractional seconds: up to three digits, right-padded (".5" is 500 ms).
fn parse_millis(frac: &str) -> Result<i32> {
    if frac.is_empty() || frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        bail!("malformed milliseconds '.{frac}'");
    }
    let mut value: i32 = frac.parse()?;
    for _ in frac.len()..3 {
        value *= 10;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let ts = parse_datetime("2021-09-30 12:00:00.002").unwrap();
        assert_eq!(format_timestamp(ts), "2021-09-30 12:00:00.002");
    }

    #[test]
    fn t_separator_and_padding() {
        let a = parse_datetime("2021-09-30T12:00:00.5").unwrap();
        let b = parse_datetime("2021-09-30 12:00:00.500").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_millis_default_to_zero() {
        let a = parse_datetime("2021-01-01 00:00:00").unwrap();
        let b = parse_datetime("2021-01-01 00:00:00.000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_instants() {
        assert!(parse_datetime("2021-02-29 00:00:00").is_err());
        assert!(parse_datetime("2021-13-01 00:00:00").is_err());
        assert!(parse_datetime("not a date").is_err());
        assert!(parse_datetime("2021-01-01 00:00:00.1234").is_err());
    }
}
