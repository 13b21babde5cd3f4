//! Records mirrored from the backend schema.
//!
//! These are transient copies of what the REST API returns. Money fields arrive as
//! decimal strings (`"1499.00"`) and are parsed into `f64`.

mod payload;
mod rent;
mod shop;
mod user;

pub use payload::{
    CategoryPayload, Credentials, LoginResponse, ProductPayload, ProfilePayload, PropertyPayload,
};
pub use rent::Property;
pub use shop::{Category, Product, SearchHit};
pub use user::{User, UserProfile};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Primary key of a backend record.
///
/// Most resources use integer keys; some deployments key properties by UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Int(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

/// Free-form key/value pair attached to a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFeature {
    pub key: String,
    pub value: String,
}

impl ExtraFeature {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Deserialize a decimal that may be sent as a JSON string or number.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal {:?}", s))),
    }
}

/// Deserialize a list that the backend may send as `null`.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
