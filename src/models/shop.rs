use super::{decimal, nullable_vec, ExtraFeature, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A second-hand item listed in the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub owner: Option<Id>,
    pub title: String,
    pub description: String,
    pub brand: String,
    /// Maximum retail price
    #[serde(deserialize_with = "decimal")]
    pub mrp: f64,
    #[serde(deserialize_with = "decimal")]
    pub selling_price: f64,
    #[serde(default)]
    pub quantity: u32,
    /// Set once an admin approves the listing
    #[serde(default)]
    pub is_ad: bool,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub is_active: bool,
    pub category: Option<Id>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub extra_features: Vec<ExtraFeature>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Trimmed product returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: Id,
    pub title: String,
    #[serde(default, deserialize_with = "decimal")]
    pub selling_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_decodes_backend_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "owner": 3,
            "title": "Casio fx-991",
            "description": "Scientific calculator",
            "brand": "Casio",
            "quantity": 1,
            "mrp": "1500.00",
            "selling_price": "900.00",
            "is_ad": false,
            "created_at": "2025-01-20T10:11:12.123456Z",
            "updated_at": "2025-01-20T10:11:12.123456Z",
            "is_sold": false,
            "is_active": true,
            "category": 2,
            "images": ["https://cdn.example/a.jpg"],
            "extra_features": null
        }))
        .unwrap();

        assert_eq!(product.id, Id::Int(7));
        assert_eq!(product.selling_price, 900.0);
        assert!(product.extra_features.is_empty());
        assert!(product.in_stock());
    }

    #[test]
    fn category_description_is_optional() {
        let category: Category =
            serde_json::from_value(json!({"id": 1, "name": "Books", "slug": "books"})).unwrap();
        assert_eq!(category.description, None);
    }
}
