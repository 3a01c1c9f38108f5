use serde::{Deserialize, Serialize};

/// A scheduled garden task as served by `/task` and `/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub time: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
}
