use super::{EventStart, ProviderEvent};

const ALL_DAY: &str = "All Day";
const GENERAL_EVENT: &str = "general event";

/// A calendar event reduced to what the schedule shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Start time of day (`HH:MM:SS`) or "All Day".
    pub time: String,
    pub title: String,
    /// Attendee nicknames, comma separated.
    pub members: String,
    pub description: Option<String>,
}

impl TaskDescriptor {
    pub fn from_event(event: &ProviderEvent) -> Self {
        TaskDescriptor {
            time: event_time(&event.start),
            title: event.summary.clone(),
            members: members_to_string(&event.attendees),
            description: event.description.clone().filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn heading(&self) -> String {
        format!("{} | {}", self.time, self.title)
    }

    pub fn members_line(&self) -> String {
        format!("Member(s): {}", self.members)
    }
}

/// Start time of day in the event's own zone.
pub fn event_time(start: &EventStart) -> String {
    match start {
        EventStart::DateTime {
            at,
            time_zone: Some(tz),
        } => at.with_timezone(tz).format("%H:%M:%S").to_string(),
        EventStart::DateTime { at, time_zone: None } => at.format("%H:%M:%S").to_string(),
        EventStart::AllDay(_) => ALL_DAY.to_string(),
    }
}

/// Nicknames are the local part of each attendee email.
pub fn members_to_string(emails: &[String]) -> String {
    if emails.is_empty() {
        return GENERAL_EVENT.to_string();
    }

    emails
        .iter()
        .map(|email| email.split('@').next().unwrap_or(email.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}
