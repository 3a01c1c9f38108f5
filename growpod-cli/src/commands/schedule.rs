use anyhow::Result;
use growpod_core::calendar::DayRange;
use growpod_core::views::{ScheduleView, date_label};
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::{Render, empty_line, error_line};
use crate::utils::time::{local_timezone, parse_day};
use crate::utils::tui::{CtrlCTeardown, create_spinner};

pub async fn run(app: &App, garden_id: Option<&str>, date: Option<&str>) -> Result<()> {
    let tz = local_timezone();
    let day = parse_day(date, tz)?;

    let mut view = ScheduleView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Loading garden...");
    view.load(garden_id).await;
    spinner.finish_and_clear();

    match &view.garden {
        Some(garden) => println!("{}", garden.render()),
        None => println!("{}", error_line(&view.error_message)),
    }

    let mut calendar = app.calendar()?;
    println!("\n{}", date_label(day).bold());
    if let Err(e) = view
        .fetch_calendar_events(&mut calendar, DayRange::for_day(day, tz))
        .await
    {
        println!("{}", error_line(&e.to_string()));
        return Ok(());
    }

    if view.tasks.is_empty() {
        println!("{}", empty_line("No events"));
    }
    for task in &view.tasks {
        println!("{}", task.render());
    }
    Ok(())
}
