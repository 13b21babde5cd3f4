mod common;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use campus_market::filter::{ProductPanel, SortKey};
use campus_market::forms::{self, ProductForm};
use campus_market::models::Id;
use campus_market::notify::CollectingNotifier;
use campus_market::storage::{LocalImage, SupabaseStorage};
use campus_market::{ApiClient, MarketError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Backend {
    created: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<(String, HeaderMap)>>>,
}

async fn products() -> Json<Value> {
    Json(json!([
        common::product(1, "Desk lamp", "Philips", "450.00", 2),
        common::product(2, "Cycle", "Hercules", "2500.00", 0),
        common::product(3, "Kettle", "philips", "900.50", 1),
    ]))
}

async fn product(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id == 1 {
        Ok(Json(common::product(1, "Desk lamp", "Philips", "450.00", 2)))
    } else {
        Err((StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))))
    }
}

async fn my_products(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get("x-session-token").and_then(|v| v.to_str().ok()) {
        Some("session-123") => Ok(Json(json!([common::product(4, "Mattress", "Sleepwell", "3000", 1)]))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn create_product(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.created.lock().unwrap().push(body.clone());
    let mut created = common::product(10, "placeholder", "placeholder", "0", 0);
    for key in ["title", "description", "brand", "quantity", "images", "category", "extra_features"] {
        created[key] = body[key].clone();
    }
    created["selling_price"] = json!(body["selling_price"].to_string());
    created["mrp"] = json!(body["mrp"].to_string());
    created["is_ad"] = json!(false);
    (StatusCode::CREATED, Json(created))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("q").map(String::as_str) {
        Some("lamp") => Json(json!({
            "products": [{"id": 1, "title": "Desk lamp", "selling_price": "450.00"}]
        })),
        _ => Json(json!({"message": "No products found matching the query."})),
    }
}

async fn upload(
    State(backend): State<Backend>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    backend.uploads.lock().unwrap().push((format!("{}/{}", bucket, path), headers));
    Json(json!({"Key": format!("{}/{}", bucket, path)}))
}

async fn start() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/products/", get(products))
        .route("/api/products/:id/", get(product))
        .route("/api/my-products/", get(my_products).post(create_product))
        .route("/api/search/", get(search))
        .route("/storage/v1/object/:bucket/*path", post(upload))
        .with_state(backend.clone());
    (common::serve(app).await, backend)
}

#[tokio::test]
async fn lists_and_filters_products() {
    let (root, _) = start().await;
    let api = ApiClient::new(&common::config_for(&root)).unwrap();

    let products = api.shop().products().await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[2].selling_price, 900.5);

    let mut panel = ProductPanel::new(products);
    panel.toggle_brand("PHILIPS");
    panel.set_sort(Some(SortKey::PriceDesc));
    let titles: Vec<String> = panel.apply().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Kettle", "Desk lamp"]);

    panel.reset();
    panel.set_in_stock(true);
    assert_eq!(panel.apply().len(), 2);
}

#[tokio::test]
async fn missing_product_maps_to_status_error() {
    let (root, _) = start().await;
    let api = ApiClient::new(&common::config_for(&root)).unwrap();

    assert_eq!(api.shop().product(&Id::from(1)).await.unwrap().brand, "Philips");

    let err = api.shop().product(&Id::from(99)).await.unwrap_err();
    match err {
        MarketError::Status { status, url, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/api/products/99/"));
            assert!(body.contains("Not found."));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn session_token_is_sent() {
    let (root, _) = start().await;
    let mut api = ApiClient::new(&common::config_for(&root)).unwrap();

    let err = api.shop().my_products().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

    api.set_session_token("session-123");
    let mine = api.shop().my_products().await.unwrap();
    assert_eq!(mine[0].title, "Mattress");
    assert_eq!(mine[0].selling_price, 3000.0);
}

#[tokio::test]
async fn search_maps_both_response_shapes() {
    let (root, _) = start().await;
    let api = ApiClient::new(&common::config_for(&root)).unwrap();

    let hits = api.shop().search("lamp").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].selling_price, 450.0);

    assert!(api.shop().search("piano").await.unwrap().is_empty());
}

#[tokio::test]
async fn add_product_uploads_images_then_creates() {
    let (root, backend) = start().await;
    let config = common::config_for(&root);
    let mut api = ApiClient::new(&config).unwrap();
    api.set_session_token("session-123");
    let storage = SupabaseStorage::new(&config).unwrap();
    let notifier = CollectingNotifier::new();

    let mut form = ProductForm {
        title: "Study table".to_string(),
        description: "Teak, barely used".to_string(),
        category: "1".to_string(),
        brand: "Nilkamal".to_string(),
        quantity: 1,
        mrp: 4000.0,
        selling_price: 1800.0,
        images: vec![
            LocalImage::new("top.png", vec![0x89, 0x50]),
            LocalImage::new("legs.jpg", vec![0xff, 0xd8]),
        ],
        ..Default::default()
    };
    form.add_feature("material", "teak");

    let created = forms::submit::add_product(&api, &storage, &notifier, &mut form)
        .await
        .unwrap();
    assert_eq!(created.title, "Study table");
    assert!(!created.is_ad);

    let uploads = backend.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 2);
    for (path, headers) in &uploads {
        assert!(path.starts_with("products/products/"));
        assert_eq!(headers["authorization"], "Bearer anon-key");
        assert_eq!(headers["x-upsert"], "false");
        assert_eq!(headers["cache-control"], "max-age=3600");
    }

    let sent = backend.created.lock().unwrap()[0].clone();
    assert_eq!(sent["category"], json!(1));
    assert_eq!(sent["extra_features"][0]["key"], "material");
    let images = sent["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0]
        .as_str()
        .unwrap()
        .starts_with(&format!("{}storage/v1/object/public/products/products/", root)));

    let notices = notifier.drain();
    assert_eq!(notices[0].title, "Product Added Successfully!");
    assert_eq!(form, ProductForm::default());
}

#[tokio::test]
async fn rejected_create_keeps_form_and_notifies() {
    let (root, backend) = start().await;
    let config = common::config_for(&root);
    // Nothing is routed under this prefix, so the create call gets a 404
    let api = ApiClient::with_base(&format!("{}missing/", root)).unwrap();
    let storage = SupabaseStorage::new(&config).unwrap();
    let notifier = CollectingNotifier::new();

    let mut form = ProductForm {
        title: "Chair".to_string(),
        description: "Plastic".to_string(),
        category: "2".to_string(),
        brand: "Supreme".to_string(),
        quantity: 1,
        mrp: 800.0,
        selling_price: 300.0,
        existing_images: vec!["https://cdn.test/public/products/chair.png".to_string()],
        ..Default::default()
    };
    let before = form.clone();

    let err = forms::submit::add_product(&api, &storage, &notifier, &mut form)
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert!(backend.created.lock().unwrap().is_empty());

    let notices = notifier.drain();
    assert!(notices[0].is_destructive());
    assert_eq!(notices[0].title, "Error Adding Product");
    assert_eq!(form, before);
}
