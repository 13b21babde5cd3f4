//! Bodies sent to the REST API on create and update.

use super::{ExtraFeature, Id};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub category: Id,
    pub brand: String,
    pub quantity: u32,
    pub mrp: f64,
    pub selling_price: f64,
    /// Public URLs of the uploaded images
    pub images: Vec<String>,
    pub extra_features: Vec<ExtraFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPayload {
    pub title: String,
    pub description: String,
    pub location: String,
    pub images: Vec<String>,
    pub rent_per_month: f64,
    pub security_deposit: f64,
    pub furnished: bool,
    pub total_vacancy: u32,
    pub available_vacancy: u32,
    pub sharing: u32,
    pub custom_features: Vec<ExtraFeature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePayload {
    /// Stored as the account username
    pub name: String,
    pub institute: String,
    pub department: String,
    pub division: String,
    pub mobile_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token issued by the admin login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub key: String,
}
