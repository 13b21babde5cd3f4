use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Extended profile attached to a user account.
///
/// The self-service endpoint returns only the profile fields plus `name`; the admin
/// endpoints add `id` and the linked `user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub name: Option<String>,
    pub institute: Option<String>,
    pub department: Option<String>,
    pub division: Option<String>,
    pub mobile_number: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
}
