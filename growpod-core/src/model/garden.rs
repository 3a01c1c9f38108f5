use serde::{Deserialize, Serialize};

/// A community gardening plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub zip_code: String,
    /// Refers to `User::id` of the garden's administrator.
    pub admin_id: String,
}
