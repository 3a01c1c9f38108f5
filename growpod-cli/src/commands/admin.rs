use anyhow::Result;
use growpod_core::validate::PlantForm;
use growpod_core::views::AdminView;
use owo_colors::OwoColorize;

use super::{unless_cancelled, value_or_prompt};
use crate::AdminAction;
use crate::app::App;
use crate::render::{Render, empty_line, error_line};
use crate::utils::tui::{CtrlCTeardown, create_spinner};

pub async fn run(app: &App, garden_id: Option<&str>, action: Option<AdminAction>) -> Result<()> {
    let mut view = AdminView::new(app.client.clone());
    let _teardown = CtrlCTeardown::install(view.scope().handle());

    let spinner = create_spinner("Loading garden...");
    view.load(garden_id).await;
    spinner.finish_and_clear();

    if view.garden.is_none() {
        println!("{}", error_line(&view.error_message));
        return Ok(());
    }

    match action {
        None => {}
        Some(AdminAction::RemoveUser { user_id }) => {
            if unless_cancelled(view.remove_user(&user_id).await)?.is_none() {
                return Ok(());
            }
            println!("{}", format!("Removed member {user_id}").green());
        }
        Some(AdminAction::AddPlant {
            nickname,
            count,
            plant_type,
        }) => {
            let form = PlantForm {
                nickname: value_or_prompt(nickname, "Nickname")?,
                count: value_or_prompt(count, "Count")?,
                plant_type_id: plant_type,
            };
            if unless_cancelled(view.add_plant(&form).await)?.is_none() {
                return Ok(());
            }
            println!("{}", format!("Added {}", form.nickname.trim()).green());
        }
        Some(AdminAction::RemovePlant { plant_id }) => {
            if unless_cancelled(view.remove_plant(&plant_id).await)?.is_none() {
                return Ok(());
            }
            println!("{}", format!("Removed plant {plant_id}").green());
        }
    }

    println!();
    print_garden(&view);
    Ok(())
}

fn print_garden(view: &AdminView) {
    if let Some(garden) = &view.garden {
        println!("{}", garden.render());
    }

    println!("\n{}", "Members".bold());
    match &view.user_list {
        Some(users) if users.is_empty() => println!("{}", empty_line("No members")),
        Some(users) => {
            for id in users {
                let name = view.user_names.get(id).unwrap_or(id.as_str());
                println!("   {} {}", name, format!("#{id}").dimmed());
            }
        }
        None => println!("{}", error_line(&view.user_list_error)),
    }

    println!("\n{}", "Plants".bold());
    match &view.plant_list {
        Some(plants) if plants.is_empty() => println!("{}", empty_line("No plants")),
        Some(plants) => {
            for id in plants {
                match view.plants.get(id) {
                    Some(plant) => println!("   {}", plant.render()),
                    None => println!("{}", error_line(&format!("Cannot load plant {id}"))),
                }
            }
        }
        None => println!("{}", error_line(&view.plant_list_error)),
    }
}
