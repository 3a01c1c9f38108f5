use anyhow::Result;
use growpod_core::views::{TaskSource, TaskView};

use crate::app::App;
use crate::render::{Render, error_line};
use crate::utils::tui::{CtrlCTeardown, create_spinner};

pub async fn run(app: &App, raw: bool) -> Result<()> {
    let source = if raw {
        TaskSource::Task
    } else {
        TaskSource::Schedule
    };

    let mut view = TaskView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Loading task...");
    view.load(source).await;
    spinner.finish_and_clear();

    match &view.task {
        Some(task) => println!("{}", task.render()),
        None => println!("{}", error_line(&view.error_message)),
    }
    Ok(())
}
