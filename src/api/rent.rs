use super::client::{item, ApiClient};
use crate::error::Result;
use crate::models::{Id, Property, PropertyPayload};
use reqwest::Method;
use tracing::info;

pub const PROPERTIES: &str = "properties/";
pub const MY_PROPERTIES: &str = "my-properties/";

/// Housing endpoints
#[derive(Debug, Clone, Copy)]
pub struct RentApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RentApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn properties(&self) -> Result<Vec<Property>> {
        let properties: Vec<Property> = self.client.get(PROPERTIES).await?;
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    /// Listings that are still open, as shown on the public rent page
    pub async fn available_properties(&self) -> Result<Vec<Property>> {
        let mut properties = self.properties().await?;
        properties.retain(|p| p.is_available);
        Ok(properties)
    }

    pub async fn property(&self, id: &Id) -> Result<Property> {
        self.client.get(&item(PROPERTIES, id)).await
    }

    pub async fn my_properties(&self) -> Result<Vec<Property>> {
        self.client.get(MY_PROPERTIES).await
    }

    pub async fn add_property(&self, payload: &PropertyPayload) -> Result<Property> {
        self.client.send(Method::POST, PROPERTIES, payload).await
    }

    pub async fn edit_property(&self, id: &Id, payload: &PropertyPayload) -> Result<Property> {
        self.client
            .send(Method::PUT, &item(PROPERTIES, id), payload)
            .await
    }

    pub async fn delete_property(&self, id: &Id) -> Result<()> {
        self.client.delete(&item(PROPERTIES, id)).await
    }

    /// Flip the listing's availability flag and return the updated record
    pub async fn toggle_availability(&self, id: &Id) -> Result<Property> {
        let path = format!("{}toggle-availability/", item(PROPERTIES, id));
        self.client.post_empty(&path).await
    }
}
