//! In-process mock of the marketplace backend.

#![allow(dead_code)]

use axum::Router;
use campus_market::AppConfig;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral port and return its root URL (with trailing `/`)
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("mock backend");
    });
    format!("http://{}/", addr)
}

/// Config pointing every endpoint at one mock server
pub fn config_for(root: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api_url = format!("{}api/", root);
    config.auth_url = format!("{}auth-api/", root);
    config.storage.url = Some(root.trim_end_matches('/').to_string());
    config.storage.key = Some("anon-key".to_string());
    config
}

pub fn product(id: i64, title: &str, brand: &str, price: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "owner": 7,
        "title": title,
        "description": format!("{} in good condition", title),
        "brand": brand,
        "mrp": "9999.00",
        "selling_price": price,
        "quantity": quantity,
        "is_ad": true,
        "is_sold": false,
        "is_active": true,
        "category": 1,
        "images": ["https://cdn.test/public/products/a.png"],
        "extra_features": [{"key": "colour", "value": "black"}],
        "created_at": format!("2024-05-{:02}T10:00:00Z", id),
        "updated_at": format!("2024-05-{:02}T10:00:00Z", id),
    })
}

pub fn property(id: i64, location: &str, rent: &str, available: u32) -> Value {
    json!({
        "id": id,
        "title": format!("Room near {}", location),
        "description": "Two minutes from the main gate",
        "location": location,
        "images": null,
        "rent_per_month": rent,
        "security_deposit": "10000.00",
        "furnished": true,
        "total_vacancy": 3,
        "available_vacancy": available,
        "sharing": 2,
        "is_available": true,
        "custom_features": [],
        "owner_name": "Ravi",
        "owner_email": "ravi@example.com",
        "created_at": format!("2024-06-{:02}T08:30:00Z", id),
        "updated_at": format!("2024-06-{:02}T08:30:00Z", id),
    })
}
