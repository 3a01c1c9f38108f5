pub mod admin;
pub mod auth;
pub mod config;
pub mod event;
pub mod gardens;
pub mod profile;
pub mod schedule;
pub mod task;

use anyhow::Result;
use dialoguer::Input;
use growpod_core::views::messages::CANCELLED;
use growpod_core::{GrowPodError, GrowPodResult};

use crate::render::empty_line;

/// Use the flag value when given, otherwise prompt for it.
pub(crate) fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(format!("  {prompt}"))
            .interact_text()?),
    }
}

/// `None` when the request was cancelled by Ctrl-C; a line saying so is
/// printed in place of the success message.
pub(crate) fn unless_cancelled<T>(result: GrowPodResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(GrowPodError::Cancelled) => {
            println!("{}", empty_line(CANCELLED));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
