use anyhow::Result;
use growpod_core::validate::SignUpForm;
use growpod_core::views::SignUpView;
use owo_colors::OwoColorize;

use super::{unless_cancelled, value_or_prompt};
use crate::app::App;
use crate::render::{Render, empty_line};
use crate::utils::tui::CtrlCTeardown;

pub async fn login(app: &mut App, sign_up: bool) -> Result<()> {
    println!("Signing in with Google...");

    let user = app.session_mut()?.sign_in().await?.clone();
    println!("{}", format!("Signed in as {}", user.email).green());

    if sign_up {
        println!();
        register(app, &user, None, None).await?;
    }

    Ok(())
}

pub async fn logout(app: &mut App) -> Result<()> {
    let session = app.session_mut()?;
    if !session.is_signed_in() {
        println!("{}", "Not signed in".dimmed());
        return Ok(());
    }

    session.sign_out().await?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session()?.user_data() {
        Some(user) => println!("{}", user.render()),
        None => println!("{}", "Not signed in".dimmed()),
    }
    Ok(())
}

pub fn users(app: &App) -> Result<()> {
    let users = app.session()?.users().get_all()?;

    if users.is_empty() {
        println!("{}", empty_line("No accounts have signed in yet"));
        return Ok(());
    }

    for user in users {
        println!("{}", user.render());
    }
    Ok(())
}

pub async fn sign_up(app: &App, biography: Option<String>, zip: Option<String>) -> Result<()> {
    let user = app.require_user()?.clone();
    register(app, &user, biography, zip).await
}

async fn register(
    app: &App,
    user: &growpod_core::session::SocialUser,
    biography: Option<String>,
    zip: Option<String>,
) -> Result<()> {
    let form = SignUpForm {
        biography: value_or_prompt(biography, "Biography")?,
        zip: value_or_prompt(zip, "Zip code")?,
    };

    let mut view = SignUpView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());
    let Some(created) = unless_cancelled(view.register(user, &form).await)? else {
        return Ok(());
    };

    println!("{}", format!("Registered {}", created.preferred_name).green());
    Ok(())
}
