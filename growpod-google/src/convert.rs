use anyhow::{Result, bail};
use chrono_tz::Tz;
use google_calendar::types::{Event, EventAttendee, EventDateTime};
use growpod_core::calendar::{CalendarEvent, EventStart, ProviderEvent};

pub fn from_google(event: Event) -> Result<ProviderEvent> {
    let start = match event.start {
        Some(EventDateTime {
            date_time: Some(at),
            time_zone,
            ..
        }) => EventStart::DateTime {
            at,
            time_zone: time_zone.parse::<Tz>().ok(),
        },
        Some(EventDateTime { date: Some(d), .. }) => EventStart::AllDay(d),
        _ => bail!("Event has no start time"),
    };

    let attendees = event
        .attendees
        .into_iter()
        .map(|a| a.email)
        .filter(|email| !email.is_empty())
        .collect();

    Ok(ProviderEvent {
        summary: event.summary,
        start,
        attendees,
        description: if event.description.is_empty() {
            None
        } else {
            Some(event.description)
        },
    })
}

pub fn to_google(event: &CalendarEvent) -> Event {
    let time = |at| EventDateTime {
        date: None,
        date_time: Some(at),
        time_zone: event.timezone.clone(),
    };

    Event {
        summary: event.title.clone(),
        description: event.description.clone().unwrap_or_default(),
        start: Some(time(event.start)),
        end: Some(time(event.end)),
        attendees: event.participants.iter().map(|p| attendee(p.as_str())).collect(),
        ..Default::default()
    }
}

fn attendee(email: &str) -> EventAttendee {
    EventAttendee {
        email: email.to_string(),
        display_name: String::new(),
        response_status: "needsAction".to_string(),
        additional_guests: 0,
        comment: String::new(),
        id: String::new(),
        optional: false,
        organizer: false,
        resource: false,
        self_: false,
    }
}
