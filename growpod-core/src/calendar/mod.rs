//! Calendar session: consent, event listing and event creation.
//!
//! The calendar provider is a separate collaborator from the sign-in
//! provider. Calendar scopes are requested lazily the first time a calendar
//! operation runs, unless the provider already holds a grant from an
//! earlier session.

mod event;
mod task;

pub use event::{CalendarEvent, DayRange, EventStart, ProviderEvent};
pub use task::TaskDescriptor;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::GrowPodResult;

/// Alias of the signed-in user's main calendar.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Whether access granted earlier is still usable without a new prompt.
    async fn has_consent(&self) -> bool;

    /// Prompt the user to grant calendar access.
    async fn request_consent(&self) -> GrowPodResult<()>;

    /// Single (expanded) events within `range`, ordered by start time.
    async fn list_events(
        &self,
        calendar_id: &str,
        range: &DayRange,
    ) -> GrowPodResult<Vec<ProviderEvent>>;

    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent) -> GrowPodResult<()>;
}

pub struct CalendarSession {
    provider: Arc<dyn CalendarProvider>,
    has_consent: bool,
}

impl CalendarSession {
    pub fn new(provider: Arc<dyn CalendarProvider>) -> Self {
        CalendarSession {
            provider,
            has_consent: false,
        }
    }

    /// Whether calendar access is known to be granted in this session.
    pub fn consent(&self) -> bool {
        self.has_consent
    }

    /// Show the consent prompt.
    pub async fn sign_in(&mut self) -> GrowPodResult<()> {
        self.provider.request_consent().await?;
        self.has_consent = true;
        info!("Calendar access granted");
        Ok(())
    }

    async fn ensure_consent(&mut self) -> GrowPodResult<()> {
        if self.has_consent {
            return Ok(());
        }

        if self.provider.has_consent().await {
            debug!("Using stored calendar access");
            self.has_consent = true;
            return Ok(());
        }

        self.sign_in().await
    }

    /// Events of the primary calendar in `range`, as display-ready tasks.
    pub async fn list_tasks(&mut self, range: &DayRange) -> GrowPodResult<Vec<TaskDescriptor>> {
        self.ensure_consent().await?;

        let mut events = self
            .provider
            .list_events(PRIMARY_CALENDAR_ID, range)
            .await?;
        events.sort_by_key(|e| e.start.sort_key());

        Ok(events.iter().map(TaskDescriptor::from_event).collect())
    }

    /// Insert a validated event into the primary calendar.
    pub async fn create_event(&mut self, event: &CalendarEvent) -> GrowPodResult<()> {
        event.validate()?;
        self.ensure_consent().await?;

        self.provider
            .insert_event(PRIMARY_CALENDAR_ID, event)
            .await?;
        info!(title = %event.title, "Created calendar event");
        Ok(())
    }
}
