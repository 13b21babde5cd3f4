use super::client::{item, ApiClient};
use crate::error::Result;
use crate::models::{
    Category, CategoryPayload, Credentials, Id, LoginResponse, Product, ProductPayload,
    ProfilePayload, Property, PropertyPayload, UserProfile,
};
use reqwest::Method;
use tracing::info;

pub const LOGIN: &str = "admin/login/";
pub const CATEGORIES: &str = "admin/categories/";
pub const PRODUCTS: &str = "admin/products/";
pub const PROPERTIES: &str = "admin/properties/";
pub const USERS: &str = "admin/users/";

/// Back-office endpoints. All but `login` require a superuser session.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in as an administrator. Non-superusers are rejected with 403.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response: LoginResponse = self.client.send(Method::POST, LOGIN, credentials).await?;
        info!("Admin login succeeded for {}", credentials.username);
        Ok(response)
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.client.get(CATEGORIES).await
    }

    pub async fn category(&self, id: &Id) -> Result<Category> {
        self.client.get(&item(CATEGORIES, id)).await
    }

    pub async fn add_category(&self, payload: &CategoryPayload) -> Result<Category> {
        self.client.send(Method::POST, CATEGORIES, payload).await
    }

    pub async fn edit_category(&self, id: &Id, payload: &CategoryPayload) -> Result<Category> {
        self.client
            .send(Method::PUT, &item(CATEGORIES, id), payload)
            .await
    }

    pub async fn delete_category(&self, id: &Id) -> Result<()> {
        self.client.delete(&item(CATEGORIES, id)).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        self.client.get(PRODUCTS).await
    }

    pub async fn product(&self, id: &Id) -> Result<Product> {
        self.client.get(&item(PRODUCTS, id)).await
    }

    pub async fn add_product(&self, payload: &ProductPayload) -> Result<Product> {
        self.client.send(Method::POST, PRODUCTS, payload).await
    }

    pub async fn edit_product(&self, id: &Id, payload: &ProductPayload) -> Result<Product> {
        self.client
            .send(Method::PUT, &item(PRODUCTS, id), payload)
            .await
    }

    pub async fn delete_product(&self, id: &Id) -> Result<()> {
        self.client.delete(&item(PRODUCTS, id)).await
    }

    pub async fn properties(&self) -> Result<Vec<Property>> {
        self.client.get(PROPERTIES).await
    }

    pub async fn property(&self, id: &Id) -> Result<Property> {
        self.client.get(&item(PROPERTIES, id)).await
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

    pub async fn users(&self) -> Result<Vec<UserProfile>> {
        self.client.get(USERS).await
    }

    pub async fn user(&self, id: &Id) -> Result<UserProfile> {
        self.client.get(&item(USERS, id)).await
    }

    pub async fn edit_user(&self, id: &Id, payload: &ProfilePayload) -> Result<UserProfile> {
        self.client
            .send(Method::PATCH, &item(USERS, id), payload)
            .await
    }
}
