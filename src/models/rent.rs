use super::{decimal, nullable_vec, ExtraFeature, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student housing listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "decimal")]
    pub rent_per_month: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub security_deposit: f64,
    #[serde(default)]
    pub furnished: bool,
    pub total_vacancy: u32,
    pub available_vacancy: u32,
    /// Occupants per room
    pub sharing: u32,
    #[serde(default = "listed", alias = "is_active")]
    pub is_available: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub custom_features: Vec<ExtraFeature>,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn listed() -> bool {
    true
}

impl Property {
    pub fn has_vacancy(&self) -> bool {
        self.available_vacancy > 0
    }
}
