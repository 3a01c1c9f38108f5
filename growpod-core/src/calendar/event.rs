use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// An event to insert into a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone name, e.g. `America/Los_Angeles`.
    pub timezone: String,
    /// Attendee emails.
    pub participants: Vec<String>,
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn validate(&self) -> Result<Tz, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("title"));
        }

        if self.timezone.trim().is_empty() {
            return Err(ValidationError::Required("timezone"));
        }
        let tz: Tz = self
            .timezone
            .trim()
            .parse()
            .map_err(|_| ValidationError::Pattern {
                field: "timezone",
                value: self.timezone.clone(),
            })?;

        if self.end < self.start {
            return Err(ValidationError::Pattern {
                field: "end",
                value: self.end.to_rfc3339(),
            });
        }

        if let Some(bad) = self.participants.iter().find(|p| !is_email(p)) {
            return Err(ValidationError::Pattern {
                field: "participant",
                value: bad.clone(),
            });
        }

        Ok(tz)
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// Start of an event as reported by the calendar provider.
#[derive(Debug, Clone, PartialEq)]
pub enum EventStart {
    DateTime {
        at: DateTime<Utc>,
        /// The zone the event was scheduled in, when the provider reports one.
        time_zone: Option<Tz>,
    },
    AllDay(NaiveDate),
}

impl EventStart {
    pub(crate) fn sort_key(&self) -> DateTime<Utc> {
        match self {
            EventStart::DateTime { at, .. } => *at,
            EventStart::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// An event listed from a calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEvent {
    pub summary: String,
    pub start: EventStart,
    pub attendees: Vec<String>,
    pub description: Option<String>,
}

/// One calendar day in a given zone, as an instant range.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRange {
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayRange {
    pub fn for_day(day: NaiveDate, tz: Tz) -> Self {
        let next = day.checked_add_days(Days::new(1)).unwrap_or(day);

        DayRange {
            day,
            start: start_of_day(day, tz),
            end: start_of_day(next, tz),
        }
    }
}

fn start_of_day(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn event() -> CalendarEvent {
        CalendarEvent {
            title: "Compost turning".into(),
            start: Utc.with_ymd_and_hms(2020, 7, 15, 16, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2020, 7, 15, 17, 0, 0).unwrap(),
            timezone: "America/New_York".into(),
            participants: vec!["ana@example.com".into()],
            description: None,
        }
    }

    #[test]
    fn valid_event_yields_zone() {
        assert_eq!(event().validate(), Ok(New_York));
    }

    #[test]
    fn rejects_unknown_zone_and_bad_emails() {
        let mut e = event();
        e.timezone = "Mars/Olympus".into();
        assert!(matches!(
            e.validate(),
            Err(ValidationError::Pattern { field: "timezone", .. })
        ));

        let mut e = event();
        e.participants.push("not-an-email".into());
        assert!(matches!(
            e.validate(),
            Err(ValidationError::Pattern { field: "participant", .. })
        ));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut e = event();
        e.end = e.start - chrono::Duration::hours(1);
        assert!(e.validate().is_err());
    }

    #[test]
    fn day_range_spans_local_day() {
        let range = DayRange::for_day(NaiveDate::from_ymd_opt(2020, 7, 15).unwrap(), New_York);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2020, 7, 15, 4, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2020, 7, 16, 4, 0, 0).unwrap());
    }
}
