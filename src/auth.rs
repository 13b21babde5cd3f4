//! Session status from the auth provider and route gating.
//!
//! The auth provider is a headless allauth deployment. It reports whether the
//! session is authenticated, which login flow (if any) is still pending, and which
//! third-party providers are enabled. Routing decisions are synchronous functions
//! over a status snapshot.

use crate::api::client::{build_http_client, parse_base, SESSION_HEADER};
use crate::config::AppConfig;
use crate::error::{MarketError, Result};
use crate::models::User;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

/// Authentication state of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    /// Id of the login flow awaiting user action, e.g. `verify_email`
    pub pending_flow: Option<String>,
    pub user: Option<User>,
}

impl AuthStatus {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// A third-party login provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
}

/// Source of authentication state
#[async_trait]
pub trait AuthSource: Send + Sync {
    async fn status(&self) -> Result<AuthStatus>;

    /// Social providers offered on the login page
    async fn providers(&self) -> Result<Vec<Provider>>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    is_authenticated: bool,
}

#[derive(Debug, Default, Deserialize)]
struct SessionData {
    user: Option<SessionUser>,
    #[serde(default)]
    flows: Vec<Flow>,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    id: crate::models::Id,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Flow {
    id: String,
    #[serde(default)]
    is_pending: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigData {
    #[serde(default)]
    socialaccount: Option<SocialAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct SocialAccount {
    #[serde(default)]
    providers: Vec<Provider>,
}

/// Form post that starts a third-party login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRedirect {
    pub action: Url,
    pub fields: Vec<(&'static str, String)>,
}

/// HTTP client for the headless allauth API
#[derive(Debug, Clone)]
pub struct AllauthClient {
    client: Client,
    base: Url,
    session_token: Option<String>,
}

impl AllauthClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base: parse_base(&config.auth_url)?,
            session_token: config.session_token.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| MarketError::Config(format!("bad auth path {:?}: {}", path, e)))
    }

    /// Build the form post that hands the browser to `provider`
    pub fn provider_redirect(
        &self,
        provider: &str,
        callback_url: &str,
        process: Option<&str>,
    ) -> Result<ProviderRedirect> {
        Ok(ProviderRedirect {
            action: self.url("auth/provider/redirect")?,
            fields: vec![
                ("provider", provider.to_string()),
                ("callback_url", callback_url.to_string()),
                ("process", process.unwrap_or("login").to_string()),
            ],
        })
    }
}

#[async_trait]
impl AuthSource for AllauthClient {
    async fn status(&self) -> Result<AuthStatus> {
        let url = self.url("auth/session")?;
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.session_token {
            request = request.header(SESSION_HEADER, token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // 401 carries the pending flows, 410 means the session expired
        if !(status.is_success() || status == StatusCode::UNAUTHORIZED || status == StatusCode::GONE) {
            return Err(MarketError::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        let envelope: Envelope<SessionData> = serde_json::from_str(&body)?;
        let data = envelope.data.unwrap_or_default();
        let is_authenticated = status.is_success() && envelope.meta.is_authenticated;

        let pending_flow = if is_authenticated {
            None
        } else {
            data.flows.into_iter().find(|f| f.is_pending).map(|f| f.id)
        };
        let user = data.user.filter(|_| is_authenticated).map(|u| User {
            id: u.id,
            username: u.username.unwrap_or_default(),
            email: u.email.unwrap_or_default(),
        });

        info!(
            "Session is {}",
            if is_authenticated { "authenticated" } else { "anonymous" }
        );
        Ok(AuthStatus {
            is_authenticated,
            pending_flow,
            user,
        })
    }

    async fn providers(&self) -> Result<Vec<Provider>> {
        let url = self.url("config")?;
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<ConfigData> =
            crate::api::client::decode(response).await?;

        Ok(envelope
            .data
            .and_then(|d| d.socialaccount)
            .map(|s| s.providers)
            .unwrap_or_default())
    }
}

/// Path for a pending login flow, if the app has a page for it
pub fn path_for_pending_flow(flow: &str) -> Option<&'static str> {
    match flow {
        "verify_email" => Some("/account/verify-email"),
        "login_by_code" => Some("/account/login/code/confirm"),
        "provider_signup" => Some("/account/provider/signup"),
        "mfa_authenticate" => Some("/account/authenticate"),
        "reauthenticate" | "mfa_reauthenticate" => Some("/account/reauthenticate"),
        _ => None,
    }
}

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Anonymous,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(String),
    NotFound,
}

pub mod routes {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const ACCOUNT_PROVIDER_CALLBACK: &str = "/account/provider/callback";
    pub const PROFILE: &str = "/profile";

    pub const SHOP: &str = "/shop";
    pub const SHOP_PRODUCT: &str = "/shop/:id";
    pub const SELL: &str = "/sell";
    pub const ADD_PRODUCT: &str = "/sell/add-product";
    pub const EDIT_PRODUCT: &str = "/sell/edit-product/:id";

    pub const RENT: &str = "/rent";
    pub const RENT_PROPERTY: &str = "/rent/:id";
    pub const ADD_PROPERTY: &str = "/rent/add-property";
    pub const RENT_MY_LISTINGS: &str = "/rent/my-listings";
    pub const EDIT_PROPERTY: &str = "/rent/my-listings/:id";

    pub const ADMIN_LOGIN: &str = "/admin/login";
    pub const ADMIN_CATEGORIES: &str = "/admin/categories";
    pub const ADMIN_PRODUCTS: &str = "/admin/products";
    pub const ADMIN_ADD_PRODUCT: &str = "/admin/products/add-product";
    pub const ADMIN_PRODUCT: &str = "/admin/products/:id";
    pub const ADMIN_EDIT_PRODUCT: &str = "/admin/products/edit/:id";
    pub const ADMIN_PROPERTIES: &str = "/admin/properties";
    pub const ADMIN_ADD_PROPERTY: &str = "/admin/properties/add-property";
    pub const ADMIN_PROPERTY: &str = "/admin/properties/:id";
    pub const ADMIN_EDIT_PROPERTY: &str = "/admin/properties/edit/:id";
    pub const ADMIN_USERS: &str = "/admin/users";
    pub const ADMIN_EDIT_USERS: &str = "/admin/users/edit/:id";

    /// Where a finished login lands
    pub const LOGIN_REDIRECT: &str = HOME;
}

/// Route table. Static paths come before templates that could shadow them.
pub const ROUTES: &[(&str, Requirement)] = &[
    (routes::LOGIN, Requirement::Anonymous),
    (routes::ACCOUNT_PROVIDER_CALLBACK, Requirement::Public),
    (routes::ADMIN_LOGIN, Requirement::Public),
    (routes::HOME, Requirement::Authenticated),
    (routes::PROFILE, Requirement::Authenticated),
    (routes::SHOP, Requirement::Authenticated),
    (routes::SELL, Requirement::Authenticated),
    (routes::ADD_PRODUCT, Requirement::Authenticated),
    (routes::EDIT_PRODUCT, Requirement::Authenticated),
    (routes::SHOP_PRODUCT, Requirement::Authenticated),
    (routes::RENT, Requirement::Authenticated),
    (routes::ADD_PROPERTY, Requirement::Authenticated),
    (routes::RENT_MY_LISTINGS, Requirement::Authenticated),
    (routes::EDIT_PROPERTY, Requirement::Authenticated),
    (routes::RENT_PROPERTY, Requirement::Authenticated),
    (routes::ADMIN_CATEGORIES, Requirement::Authenticated),
    (routes::ADMIN_PRODUCTS, Requirement::Authenticated),
    (routes::ADMIN_ADD_PRODUCT, Requirement::Authenticated),
    (routes::ADMIN_EDIT_PRODUCT, Requirement::Authenticated),
    (routes::ADMIN_PRODUCT, Requirement::Authenticated),
    (routes::ADMIN_PROPERTIES, Requirement::Authenticated),
    (routes::ADMIN_ADD_PROPERTY, Requirement::Authenticated),
    (routes::ADMIN_EDIT_PROPERTY, Requirement::Authenticated),
    (routes::ADMIN_PROPERTY, Requirement::Authenticated),
    (routes::ADMIN_USERS, Requirement::Authenticated),
    (routes::ADMIN_EDIT_USERS, Requirement::Authenticated),
];

/// Fill a `:param` template segment by segment
pub fn route_for(template: &str, id: impl std::fmt::Display) -> String {
    let id = id.to_string();
    template
        .split('/')
        .map(|seg| if seg.starts_with(':') { id.as_str() } else { seg })
        .collect::<Vec<_>>()
        .join("/")
}

fn matches_template(template: &str, path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

    let mut t = template.split('/');
    let mut p = path.split('/');
    loop {
        match (t.next(), p.next()) {
            (None, None) => return true,
            (Some(ts), Some(ps)) if ts.starts_with(':') && !ps.is_empty() => {}
            (Some(ts), Some(ps)) if ts == ps => {}
            _ => return false,
        }
    }
}

/// Requirement of the first route matching `path`
pub fn requirement_for(path: &str) -> Option<Requirement> {
    ROUTES
        .iter()
        .find(|(template, _)| matches_template(template, path))
        .map(|(_, req)| *req)
}

/// Decide whether a route with `requirement` renders for `status`
pub fn guard(requirement: Requirement, status: &AuthStatus) -> Access {
    match requirement {
        Requirement::Public => Access::Render,
        Requirement::Authenticated if status.is_authenticated => Access::Render,
        Requirement::Authenticated => {
            let target = status
                .pending_flow
                .as_deref()
                .and_then(path_for_pending_flow)
                .unwrap_or(routes::LOGIN);
            Access::Redirect(target.to_string())
        }
        Requirement::Anonymous if status.is_authenticated => {
            Access::Redirect(routes::LOGIN_REDIRECT.to_string())
        }
        Requirement::Anonymous => Access::Render,
    }
}

/// Route lookup plus gating, run on every navigation
pub fn navigate(path: &str, status: &AuthStatus) -> Access {
    match requirement_for(path) {
        Some(requirement) => guard(requirement, status),
        None => Access::NotFound,
    }
}

/// Result of returning from a third-party provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Redirect(String),
    /// The provider reported an error; offer a link to `continue_to`
    Failure { continue_to: String },
}

pub fn provider_callback(error: Option<&str>, status: &AuthStatus) -> Callback {
    let url = if status.is_authenticated {
        routes::LOGIN_REDIRECT
    } else {
        status
            .pending_flow
            .as_deref()
            .and_then(path_for_pending_flow)
            .unwrap_or(routes::LOGIN)
    };

    match error {
        Some(_) => Callback::Failure {
            continue_to: url.to_string(),
        },
        None => Callback::Redirect(url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthStatus {
        AuthStatus {
            is_authenticated: true,
            ..Default::default()
        }
    }

    fn pending(flow: &str) -> AuthStatus {
        AuthStatus {
            pending_flow: Some(flow.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn authenticated_routes_send_anonymous_users_to_login() {
        assert_eq!(
            guard(Requirement::Authenticated, &AuthStatus::anonymous()),
            Access::Redirect("/login".to_string())
        );
        assert_eq!(guard(Requirement::Authenticated, &signed_in()), Access::Render);
    }

    #[test]
    fn pending_flow_wins_over_login() {
        assert_eq!(
            guard(Requirement::Authenticated, &pending("verify_email")),
            Access::Redirect("/account/verify-email".to_string())
        );
        assert_eq!(
            guard(Requirement::Authenticated, &pending("something_new")),
            Access::Redirect("/login".to_string())
        );
    }

    #[test]
    fn anonymous_routes_bounce_signed_in_users() {
        assert_eq!(
            guard(Requirement::Anonymous, &signed_in()),
            Access::Redirect("/".to_string())
        );
        assert_eq!(guard(Requirement::Anonymous, &AuthStatus::anonymous()), Access::Render);
        assert_eq!(guard(Requirement::Public, &AuthStatus::anonymous()), Access::Render);
    }

    #[test]
    fn navigation_resolves_templates() {
        assert_eq!(requirement_for("/shop/42"), Some(Requirement::Authenticated));
        assert_eq!(requirement_for("/login"), Some(Requirement::Anonymous));
        assert_eq!(requirement_for("/rent/add-property/"), Some(Requirement::Authenticated));
        assert_eq!(
            requirement_for("/account/provider/callback?error=denied"),
            Some(Requirement::Public)
        );
        assert_eq!(requirement_for("/shop/"), Some(Requirement::Authenticated));
        assert_eq!(navigate("/nowhere", &signed_in()), Access::NotFound);
        assert_eq!(
            navigate("/admin/products/edit/9", &AuthStatus::anonymous()),
            Access::Redirect("/login".to_string())
        );
    }

    #[test]
    fn route_for_fills_id() {
        assert_eq!(route_for(routes::EDIT_PROPERTY, 17), "/rent/my-listings/17");
        assert_eq!(route_for(routes::SHOP, 17), "/shop");
    }

    #[test]
    fn callback_outcomes() {
        assert_eq!(
            provider_callback(None, &signed_in()),
            Callback::Redirect("/".to_string())
        );
        assert_eq!(
            provider_callback(None, &pending("provider_signup")),
            Callback::Redirect("/account/provider/signup".to_string())
        );
        assert_eq!(
            provider_callback(Some("cancelled"), &AuthStatus::anonymous()),
            Callback::Failure {
                continue_to: "/login".to_string()
            }
        );
    }

    #[test]
    fn provider_redirect_form() {
        let client = AllauthClient::new(&AppConfig::default()).unwrap();
        let redirect = client
            .provider_redirect("google", "/account/provider/callback", None)
            .unwrap();
        assert_eq!(
            redirect.action.as_str(),
            "http://localhost:10000/_allauth/app/v1/auth/provider/redirect"
        );
        assert_eq!(redirect.fields[2], ("process", "login".to_string()));
    }
}
