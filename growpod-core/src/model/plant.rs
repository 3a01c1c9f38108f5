use serde::{Deserialize, Serialize};

/// A plant on a garden's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub nickname: String,
    pub count: u64,
    pub plant_type_id: String,
}
