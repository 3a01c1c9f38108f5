use anyhow::Result;
use growpod_core::validate::GardenForm;
use growpod_core::views::{CreateGardenView, FindGardensView, MyGardensView};
use owo_colors::OwoColorize;

use super::{unless_cancelled, value_or_prompt};
use crate::app::App;
use crate::render::{Render, empty_line, error_line, garden_with_admin};
use crate::utils::tui::{CtrlCTeardown, create_spinner};

pub async fn find(app: &App, zip: Option<&str>) -> Result<()> {
    let mut view = FindGardensView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Finding gardens...");
    view.load(zip).await;
    spinner.finish_and_clear();

    let Some(gardens) = &view.garden_list else {
        println!("{}", error_line(&view.error_message));
        return Ok(());
    };

    if gardens.is_empty() {
        println!("{}", empty_line("No gardens found"));
        return Ok(());
    }

    for garden in gardens {
        let line = garden_with_admin(garden, &view.garden_admin_names);
        if view.is_member(&garden.id) {
            println!("{} {}", line, "(joined)".green());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn join(app: &App, garden_id: &str) -> Result<()> {
    let mut view = FindGardensView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    view.refresh_user_garden_set().await;
    if view.is_member(garden_id) {
        println!("{}", format!("Already a member of garden {garden_id}").dimmed());
        return Ok(());
    }

    if unless_cancelled(view.join_garden(garden_id).await)?.is_none() {
        return Ok(());
    }
    println!("{}", format!("Joined garden {garden_id}").green());
    Ok(())
}

pub async fn mine(app: &App) -> Result<()> {
    let mut view = MyGardensView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Loading your gardens...");
    view.load().await;
    spinner.finish_and_clear();

    print_section(
        &view,
        "Gardens you administer",
        view.garden_admin_list.as_deref(),
        &view.garden_admin_list_error,
    );
    println!();
    print_section(
        &view,
        "Gardens you belong to",
        view.garden_list.as_deref(),
        &view.garden_list_error,
    );
    Ok(())
}

fn print_section(view: &MyGardensView, title: &str, ids: Option<&[String]>, error: &str) {
    println!("{}", title.bold());

    let Some(ids) = ids else {
        println!("{}", error_line(error));
        return;
    };

    if ids.is_empty() {
        println!("{}", empty_line("None"));
    }

    for id in ids {
        match view.gardens.get(id) {
            Some(garden) => println!("{}", garden_with_admin(garden, &view.garden_admin_names)),
            None => println!("{}", error_line(&format!("Cannot load garden {id}"))),
        }
    }
}

pub async fn leave(app: &App, garden_id: &str) -> Result<()> {
    let mut view = MyGardensView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    if unless_cancelled(view.leave_garden(garden_id).await)?.is_none() {
        return Ok(());
    }
    println!("{}", format!("Left garden {garden_id}").green());
    Ok(())
}

pub async fn create(
    app: &App,
    name: Option<String>,
    description: Option<String>,
    zip: Option<String>,
) -> Result<()> {
    let user = app.require_user()?;

    let form = GardenForm {
        name: value_or_prompt(name, "Garden name")?,
        description: value_or_prompt(description, "Description")?,
        zip: value_or_prompt(zip, "Zip code")?,
    };

    let mut view = CreateGardenView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());
    let Some(garden) = unless_cancelled(view.create(Some(user), &form).await)? else {
        return Ok(());
    };

    println!("{}", format!("  {}: {}", view.outcome, garden.name).green());
    Ok(())
}
