use super::{RentApi, ShopApi};
use crate::error::Result;
use crate::models::{Product, Property};
use async_trait::async_trait;

/// Common trait for the public listing collections.
///
/// Lets callers treat the shop and rent catalogs uniformly.
#[async_trait]
pub trait ListingSource: Send + Sync {
    type Item: Send;

    /// Fetch the full public collection
    async fn fetch_listings(&self) -> Result<Vec<Self::Item>>;

    /// Name of the vertical, for logging
    fn source_name(&self) -> &'static str;
}

#[async_trait]
impl ListingSource for ShopApi<'_> {
    type Item = Product;

    async fn fetch_listings(&self) -> Result<Vec<Product>> {
        self.products().await
    }

    fn source_name(&self) -> &'static str {
        "shop"
    }
}

#[async_trait]
impl ListingSource for RentApi<'_> {
    type Item = Property;

    async fn fetch_listings(&self) -> Result<Vec<Property>> {
        self.available_properties().await
    }

    fn source_name(&self) -> &'static str {
        "rent"
    }
}
