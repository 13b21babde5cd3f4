use super::client::{item, ApiClient};
use crate::error::Result;
use crate::models::{Category, Id, Product, ProductPayload, SearchHit};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

pub const CATEGORIES: &str = "categories/";
pub const PRODUCTS: &str = "products/";
pub const MY_PRODUCTS: &str = "my-products/";
pub const SEARCH: &str = "search/";

/// Shop endpoints: public catalog, the caller's own listings, and search
#[derive(Debug, Clone, Copy)]
pub struct ShopApi<'a> {
    client: &'a ApiClient,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<SearchHit>,
    #[serde(default)]
    message: Option<String>,
}

impl<'a> ShopApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.client.get(CATEGORIES).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.client.get(PRODUCTS).await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    pub async fn product(&self, id: &Id) -> Result<Product> {
        self.client.get(&item(PRODUCTS, id)).await
    }

    pub async fn my_products(&self) -> Result<Vec<Product>> {
        self.client.get(MY_PRODUCTS).await
    }

    pub async fn my_product(&self, id: &Id) -> Result<Product> {
        self.client.get(&item(MY_PRODUCTS, id)).await
    }

    pub async fn add_product(&self, payload: &ProductPayload) -> Result<Product> {
        self.client.send(Method::POST, MY_PRODUCTS, payload).await
    }

    /// Partial update of one of the caller's products
    pub async fn edit_product(&self, id: &Id, payload: &ProductPayload) -> Result<Product> {
        self.client
            .send(Method::PATCH, &item(MY_PRODUCTS, id), payload)
            .await
    }

    pub async fn delete_product(&self, id: &Id) -> Result<()> {
        self.client.delete(&item(MY_PRODUCTS, id)).await
    }

    /// Full-text search. An empty query returns nothing without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response: SearchResponse = self.client.get_query(SEARCH, &[("q", query)]).await?;
        if let Some(message) = response.message {
            debug!("Search for {:?}: {}", query, message);
        }
        Ok(response.products)
    }
}
