//! A garden's schedule: the garden itself plus the day's calendar events.

use chrono::NaiveDate;

use super::ViewScope;
use super::messages::report;
use crate::api::GrowPodClient;
use crate::calendar::{CalendarSession, DayRange, TaskDescriptor};
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::Garden;

pub struct ScheduleView {
    client: GrowPodClient,
    scope: ViewScope,
    pub garden: Option<Garden>,
    pub error_message: String,
    pub day: Option<DayRange>,
    pub tasks: Vec<TaskDescriptor>,
    pub calendar_error: String,
}

impl ScheduleView {
    pub fn new(client: GrowPodClient) -> Self {
        ScheduleView {
            client,
            scope: ViewScope::new(),
            garden: None,
            error_message: String::new(),
            day: None,
            tasks: Vec::new(),
            calendar_error: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Load the garden; no argument means `current`.
    pub async fn load(&mut self, garden_id: Option<&str>) {
        let id = garden_id.unwrap_or("current");

        let Some(result) = self.scope.guard(self.client.get_garden(id)).await else {
            return;
        };

        match result {
            Ok(garden) => {
                self.garden = Some(garden);
                self.error_message.clear();
            }
            Err(e) => {
                self.garden = None;
                self.error_message =
                    report(&e, Some(format!("Cannot see garden for garden id: {id}")));
            }
        }
    }

    /// Replace the task list with the events of `day`.
    pub async fn fetch_calendar_events(
        &mut self,
        calendar: &mut CalendarSession,
        day: DayRange,
    ) -> GrowPodResult<()> {
        let Some(result) = self.scope.guard(calendar.list_tasks(&day)).await else {
            return Err(GrowPodError::Cancelled);
        };

        self.day = Some(day);
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.calendar_error.clear();
                Ok(())
            }
            Err(e) => {
                self.tasks.clear();
                self.calendar_error = e.to_string();
                report(&e, None);
                Err(e)
            }
        }
    }
}

/// e.g. "Wed: Oct 14, 2026"
pub fn date_label(day: NaiveDate) -> String {
    day.format("%a: %b %-d, %Y").to_string()
}
