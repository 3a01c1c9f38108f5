use anyhow::Result;
use chrono::Duration;
use dialoguer::Input;
use growpod_core::calendar::CalendarEvent;
use owo_colors::OwoColorize;

use super::value_or_prompt;
use crate::app::App;
use crate::utils::time::{local_timezone, parse_duration, parse_start, parse_timezone};

pub struct EventArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub timezone: Option<String>,
    pub participants: Vec<String>,
    pub description: Option<String>,
}

pub async fn run(app: &App, args: EventArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.start.is_none();

    let tz = match &args.timezone {
        Some(name) => parse_timezone(name)?,
        None => local_timezone(),
    };

    let title = value_or_prompt(args.title, "Title")?;

    let start = match args.start {
        Some(s) => parse_start(&s, tz)?,
        None => prompt_with_retry("  When?", |s| parse_start(s, tz))?,
    };

    let duration = match args.duration {
        Some(d) => parse_duration(&d)?,
        None if interactive => prompt_duration()?,
        None => Duration::hours(1),
    };

    let participants = if args.participants.is_empty() && interactive {
        let input: String = Input::new()
            .with_prompt("  Participants (comma separated, skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        split_participants(&input)
    } else {
        args.participants
    };

    let event = CalendarEvent {
        title,
        start,
        end: start + duration,
        timezone: tz.name().to_string(),
        participants,
        description: args.description.filter(|d| !d.trim().is_empty()),
    };

    let mut calendar = app.calendar()?;
    calendar.create_event(&event).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.title).green());
    Ok(())
}

fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_duration() -> Result<Duration> {
    loop {
        let input: String = Input::new()
            .with_prompt("  How long? (1 hour)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(Duration::hours(1));
        }
        match parse_duration(&input) {
            Ok(d) => return Ok(d),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn split_participants(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
