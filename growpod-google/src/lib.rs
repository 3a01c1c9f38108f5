//! Google integrations for the GrowPod client.
//!
//! - [`GoogleSignIn`] signs users in with Google (OpenID Connect) and hands
//!   the ID token to the GrowPod server.
//! - [`GoogleCalendar`] reads and writes the signed-in user's primary
//!   Google Calendar.
//!
//! Both run the OAuth authorization-code flow with a loopback redirect and
//! persist their tokens under `~/.config/growpod/google/`.

mod calendar;
mod convert;
mod oauth;
mod sign_in;
mod token_store;

pub use calendar::GoogleCalendar;
pub use sign_in::GoogleSignIn;
pub use token_store::TokenStore;

use std::path::PathBuf;

use growpod_core::config::GrowPodConfig;
use growpod_core::{GrowPodError, GrowPodResult};

/// Directory holding the Google token files.
pub fn base_dir() -> GrowPodResult<PathBuf> {
    Ok(GrowPodConfig::config_dir()?.join("google"))
}

fn auth_error(e: anyhow::Error) -> GrowPodError {
    GrowPodError::Auth(format!("{e:#}"))
}

fn calendar_error(e: anyhow::Error) -> GrowPodError {
    GrowPodError::Calendar(format!("{e:#}"))
}
