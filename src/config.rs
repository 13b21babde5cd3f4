use crate::error::{MarketError, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:10000/_allauth/api/";
const DEFAULT_AUTH_URL: &str = "http://localhost:10000/_allauth/app/v1/";
const DEFAULT_BUCKET: &str = "products";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Runtime configuration for the marketplace client
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, always ending in `/`
    pub api_url: String,
    /// Base URL of the headless auth API, always ending in `/`
    pub auth_url: String,
    pub storage: StorageConfig,
    /// Session token sent as `X-Session-Token`
    pub session_token: Option<String>,
    pub timeout: Duration,
    pub search_debounce: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub bucket: String,
}

/// Shape of the optional TOML file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    auth_url: Option<String>,
    session_token: Option<String>,
    timeout_secs: Option<u64>,
    search_debounce_ms: Option<u64>,
    #[serde(default)]
    storage: FileStorageConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileStorageConfig {
    url: Option<String>,
    key: Option<String>,
    bucket: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            storage: StorageConfig {
                url: None,
                key: None,
                bucket: DEFAULT_BUCKET.to_string(),
            },
            session_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file if given, then `.env` and
    /// process environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(path) = file {
            config.merge_file(path)?;
        }
        config.merge_env(|key| env::var(key).ok())?;
        config.normalize();
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|e| MarketError::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.auth_url {
            self.auth_url = v;
        }
        if file.session_token.is_some() {
            self.session_token = file.session_token;
        }
        if let Some(v) = file.timeout_secs {
            self.timeout = Duration::from_secs(v);
        }
        if let Some(v) = file.search_debounce_ms {
            self.search_debounce = Duration::from_millis(v);
        }
        if file.storage.url.is_some() {
            self.storage.url = file.storage.url;
        }
        if file.storage.key.is_some() {
            self.storage.key = file.storage.key;
        }
        if let Some(v) = file.storage.bucket {
            self.storage.bucket = v;
        }
        Ok(())
    }

    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("MARKET_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("MARKET_AUTH_URL") {
            self.auth_url = v;
        }
        if let Some(v) = lookup("MARKET_SESSION_TOKEN") {
            self.session_token = Some(v);
        }
        if let Some(v) = lookup("MARKET_STORAGE_URL") {
            self.storage.url = Some(v);
        }
        if let Some(v) = lookup("MARKET_STORAGE_KEY") {
            self.storage.key = Some(v);
        }
        if let Some(v) = lookup("MARKET_STORAGE_BUCKET") {
            self.storage.bucket = v;
        }
        if let Some(v) = lookup("MARKET_TIMEOUT_SECS") {
            let secs = v
                .parse()
                .map_err(|_| MarketError::Config(format!("MARKET_TIMEOUT_SECS: invalid value {v:?}")))?;
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("MARKET_SEARCH_DEBOUNCE_MS") {
            let ms = v.parse().map_err(|_| {
                MarketError::Config(format!("MARKET_SEARCH_DEBOUNCE_MS: invalid value {v:?}"))
            })?;
            self.search_debounce = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn normalize(&mut self) {
        for url in [&mut self.api_url, &mut self.auth_url] {
            if !url.ends_with('/') {
                url.push('/');
            }
        }
        if let Some(url) = self.storage.url.as_mut() {
            while url.ends_with('/') {
                url.pop();
            }
        }
    }
}
