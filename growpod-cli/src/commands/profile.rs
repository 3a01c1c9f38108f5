use anyhow::Result;
use growpod_core::views::UserProfileView;

use crate::app::App;
use crate::render::{Render, error_line};
use crate::utils::tui::{CtrlCTeardown, create_spinner};

pub async fn run(app: &App, user_id: Option<&str>) -> Result<()> {
    let mut view = UserProfileView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Loading profile...");
    view.load(user_id).await;
    spinner.finish_and_clear();

    match &view.user {
        Some(user) => println!("{}", user.render()),
        None => println!("{}", error_line(&view.error_message)),
    }
    Ok(())
}
