use crate::application::ApplicationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The account an identity provider vouched for after a sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Stable subject id at the provider.
    pub subject: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// OAuth 2.0 authorization-code sign-in against an external provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider URL the browser is sent to, carrying `state` back to the callback.
    fn authorization_url(&self, state: &str) -> ApplicationResult<String>;

    /// Redeems `code` and fetches the signed-in identity.
    async fn identify(&self, code: &str) -> ApplicationResult<ExternalIdentity>;
}

/// One-time `state` values handed out at login and checked on callback.
#[async_trait]
pub trait LoginStateStore: Send + Sync {
    async fn save(&self, state: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()>;

    /// Removes `state`; `true` when it was issued here and is still valid at `now`.
    async fn consume(&self, state: &str, now: DateTime<Utc>) -> ApplicationResult<bool>;
}
