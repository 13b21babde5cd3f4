use crate::config::AppConfig;
use crate::error::{MarketError, Result};
use crate::models::Id;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{AdminApi, ProfileApi, RentApi, ShopApi};

/// Header carrying the headless session token
pub const SESSION_HEADER: &str = "X-Session-Token";

const USER_AGENT: &str = concat!("campus-market/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to the marketplace REST API.
///
/// Every path is relative to the base URL and follows the trailing-slash
/// convention: `{resource}/` for collections, `{resource}/{id}/` for items.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    session_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_http_client(config)?;
        let base = parse_base(&config.api_url)?;

        Ok(Self {
            client,
            base,
            session_token: config.session_token.clone(),
        })
    }

    /// Client with default settings against the given base URL
    pub fn with_base(base: &str) -> Result<Self> {
        Self::new(&AppConfig {
            api_url: base.to_string(),
            ..AppConfig::default()
        })
    }

    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = Some(token.into());
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn shop(&self) -> ShopApi<'_> {
        ShopApi::new(self)
    }

    pub fn rent(&self) -> RentApi<'_> {
        RentApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| MarketError::Config(format!("bad path {:?}: {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.session_token {
            builder = builder.header(SESSION_HEADER, token);
        }
        Ok(builder)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path)?.send().await?;
        decode(response).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        decode(response).await
    }

    pub(crate) async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path)?.json(body).send().await?;
        decode(response).await
    }

    /// POST without a body, for action endpoints
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::POST, path)?.send().await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        check_status(response).await.map(|_| ())
    }
}

/// Build the shared reqwest client from config
pub(crate) fn build_http_client(config: &AppConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

pub(crate) fn parse_base(raw: &str) -> Result<Url> {
    let mut raw = raw.to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| MarketError::Config(format!("bad base URL {:?}: {}", raw, e)))
}

/// Path of a single item under a collection path
pub(crate) fn item(collection: &str, id: &Id) -> String {
    format!("{}{}/", collection, id)
}

/// Turn a non-success response into [`MarketError::Status`]
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!("{} returned status: {}", url, status);
    Err(MarketError::Status { status, url, body })
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    debug!("Received {} bytes", body.len());

    // Empty 2xx bodies decode as JSON null so `()` and `Option<_>` targets work
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_under_base() {
        let client = ApiClient::with_base("http://localhost:10000/_allauth/api").unwrap();
        let url = client.url(&item("products/", &Id::Int(12))).unwrap();
        assert_eq!(url.as_str(), "http://localhost:10000/_allauth/api/products/12/");
    }

    #[test]
    fn bad_base_is_config_error() {
        assert!(matches!(
            ApiClient::with_base("not a url"),
            Err(MarketError::Config(_))
        ));
    }

    #[test]
    fn session_token_is_kept() {
        let mut client = ApiClient::with_base("http://localhost/api/").unwrap();
        assert_eq!(client.session_token(), None);
        client.set_session_token("tok");
        assert_eq!(client.session_token(), Some("tok"));
    }
}
