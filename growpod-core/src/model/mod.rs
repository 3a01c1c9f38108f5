//! Records mirrored from GrowPod REST payloads.

mod garden;
mod plant;
mod task;
mod user;

pub use garden::Garden;
pub use plant::Plant;
pub use task::Task;
pub use user::{User, UserRef};
