use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// The system time zone, or UTC when it cannot be determined.
pub fn local_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or_else(|| {
            debug!("Could not determine system time zone, using UTC");
            Tz::UTC
        })
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown time zone: \"{}\"", name))
}

/// `YYYY-MM-DD`, or today in `tz` when absent.
pub fn parse_day(input: Option<&str>, tz: Tz) -> Result<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", s)),
        None => Ok(Utc::now().with_timezone(&tz).date_naive()),
    }
}

/// A wall-clock start time in `tz`: exact formats first, then natural language.
pub fn parse_start(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(Ok)
        .unwrap_or_else(|| {
            fuzzydate::parse(input)
                .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("{} does not exist in {}", naive, tz))
}

pub fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow::anyhow!("Could not parse duration \"{}\": {}", input, e))?;
    Duration::from_std(std_dur).context("Duration too large")
}
