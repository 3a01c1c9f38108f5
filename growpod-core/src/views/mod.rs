//! State and operations behind each page of the client.
//!
//! A view owns exactly what its page renders: a data field, an error string,
//! and per-item display maps. Views never propagate fetch failures; they log
//! them and store a human-readable message instead. Mutations also return
//! the failure so callers can report it.

mod admin;
mod create_garden;
mod fanout;
mod find_gardens;
pub mod messages;
mod my_gardens;
mod schedule;
mod scope;
mod sign_up;
mod task;
mod user_profile;

pub use admin::AdminView;
pub use create_garden::CreateGardenView;
pub use fanout::NameDirectory;
pub use find_gardens::FindGardensView;
pub use my_gardens::{MyGardensView, filter_admin_gardens};
pub use schedule::{ScheduleView, date_label};
pub use scope::{TeardownHandle, ViewScope};
pub use sign_up::SignUpView;
pub use task::{TaskSource, TaskView};
pub use user_profile::UserProfileView;
