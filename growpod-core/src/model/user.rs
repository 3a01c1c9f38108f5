use std::fmt;

use serde::{Deserialize, Serialize};

/// A GrowPod member profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub preferred_name: String,
    pub biography: String,
    pub zip_code: String,
}

/// Path segment addressing a user: the signed-in user or a specific id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Current,
    Id(String),
}

impl UserRef {
    /// `None` (no argument given) means the current user.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("current") => UserRef::Current,
            Some(id) => UserRef::Id(id.to_string()),
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Current => write!(f, "current"),
            UserRef::Id(id) => write!(f, "{id}"),
        }
    }
}
