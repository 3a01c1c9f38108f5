//! Core types for the GrowPod client.
//!
//! This crate provides everything the `growpod` binary and identity providers share:
//! - `model` records mirrored from the GrowPod REST API
//! - `api` transport seam and the typed REST client
//! - `session` sign-in state machine and the local user cache
//! - `calendar` calendar session and task descriptors
//! - `views` the state and operations behind each page

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod validate;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GrowPodError, GrowPodResult};
pub use model::*;
