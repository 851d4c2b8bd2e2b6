// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use linkforge::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use linkforge::application::error::ApplicationError;
use linkforge::application::ports::identity::{ExternalIdentity, IdentityProvider};
use linkforge::application::ports::security::{PasswordHasher, TokenManager};
use linkforge::application::ApplicationResult;
use linkforge::domain::user::UserId;
use std::collections::HashMap;

/// 失効済みとして扱う固定トークン
pub const EXPIRED_TOKEN: &str = "expired-token";

const TOKEN_PREFIX: &str = "test-token";

/// Bearer string the dummy token manager accepts for `user_id`.
pub fn token_for(user_id: i64, is_superuser: bool) -> String {
    format!("{TOKEN_PREFIX}:{user_id}:user:{is_superuser}")
}

/* -------------------------------- TokenManager -------------------------------- */

/// 署名の代わりに平文の固定書式でユーザーを表すトークンマネージャー
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!(
                "{TOKEN_PREFIX}:{}:{}:{}",
                subject.user_id.0, subject.username, subject.is_superuser
            ),
            token_type: "Bearer".into(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        if token == EXPIRED_TOKEN {
            return Err(ApplicationError::unauthorized("token expired"));
        }
        let mut parts = token.split(':');
        let (Some(TOKEN_PREFIX), Some(id), Some(username), Some(superuser), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(ApplicationError::unauthorized("invalid token"));
        };
        let id = id
            .parse()
            .map_err(|_| ApplicationError::unauthorized("invalid token"))?;
        let now = super::time::fixed_now();
        Ok(AuthenticatedUser {
            id: UserId(id),
            username: username.to_string(),
            is_superuser: superuser == "true",
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }
}

/* -------------------------------- PasswordHasher -------------------------------- */

/// 厳密なパスワードハッシャー（平文に接頭辞を付けるだけ）
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("bad password"))
        }
    }
}

/* -------------------------------- IdentityProvider -------------------------------- */

pub const IDP_AUTHORIZE_URL: &str = "https://id.test/oauth/authorize";

/// 認可コードごとに決まった ID を返す IdP スタブ
#[derive(Clone, Debug, Default)]
pub struct StubIdentityProvider {
    identities: HashMap<String, ExternalIdentity>,
}

impl StubIdentityProvider {
    pub fn with_code(mut self, code: &str, identity: ExternalIdentity) -> Self {
        self.identities.insert(code.to_string(), identity);
        self
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    fn authorization_url(&self, state: &str) -> ApplicationResult<String> {
        Ok(format!("{IDP_AUTHORIZE_URL}?client_id=linkforge&state={state}"))
    }

    async fn identify(&self, code: &str) -> ApplicationResult<ExternalIdentity> {
        self.identities.get(code).cloned().ok_or_else(|| {
            ApplicationError::validation("Failed to exchange token: invalid_grant")
        })
    }
}

/// IdP が返す利用者プロフィール
pub fn external_identity(subject: &str, username: &str) -> ExternalIdentity {
    ExternalIdentity {
        subject: subject.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: None,
        avatar_url: None,
    }
}
