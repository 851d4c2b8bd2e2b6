// src/infrastructure/oauth.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::identity::{ExternalIdentity, IdentityProvider},
};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Client registration and endpoints of the OAuth identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

/// Authorization-code flow: browser redirect, code exchange, then a bearer
/// request for the user profile.
#[derive(Clone)]
pub struct OAuthIdentityProvider {
    client: reqwest::Client,
    settings: OAuthSettings,
}

impl OAuthIdentityProvider {
    pub fn new(settings: OAuthSettings, timeout: Duration) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn exchange_code(&self, code: &str) -> Result<String, reqwest::Error> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ];
        let token: TokenResponse = self
            .client
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ProfileResponse, reqwest::Error> {
        self.client
            .get(&self.settings.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: Value,
    username: String,
    email: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl ProfileResponse {
    fn into_identity(self) -> ApplicationResult<ExternalIdentity> {
        let subject = match self.id {
            Value::String(id) if !id.is_empty() => id,
            Value::Number(id) => id.to_string(),
            _ => {
                return Err(ApplicationError::validation(
                    "Failed to fetch user info: missing user id",
                ));
            }
        };
        Ok(ExternalIdentity {
            subject,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            avatar_url: self.avatar_url,
        })
    }
}

#[async_trait]
impl IdentityProvider for OAuthIdentityProvider {
    fn authorization_url(&self, state: &str) -> ApplicationResult<String> {
        Url::parse_with_params(
            &self.settings.authorize_url,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("scope", self.settings.scope.as_str()),
                ("state", state),
            ],
        )
        .map(String::from)
        .map_err(|err| ApplicationError::infrastructure(format!("authorize url: {err}")))
    }

    async fn identify(&self, code: &str) -> ApplicationResult<ExternalIdentity> {
        let access_token = self.exchange_code(code).await.map_err(|err| {
            tracing::warn!(error = %err, "authorization code exchange failed");
            ApplicationError::validation(format!("Failed to exchange token: {err}"))
        })?;
        let profile = self.fetch_profile(&access_token).await.map_err(|err| {
            tracing::warn!(error = %err, "user info request failed");
            ApplicationError::validation(format!("Failed to fetch user info: {err}"))
        })?;
        profile.into_identity()
    }
}
