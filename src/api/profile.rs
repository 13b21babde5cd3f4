use super::client::ApiClient;
use crate::error::Result;
use crate::models::{ProfilePayload, UserProfile};
use reqwest::Method;

pub const PROFILE: &str = "profile/";

/// The signed-in user's own profile
#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<UserProfile> {
        self.client.get(PROFILE).await
    }

    pub async fn update(&self, payload: &ProfilePayload) -> Result<UserProfile> {
        self.client.send(Method::PUT, PROFILE, payload).await
    }
}
