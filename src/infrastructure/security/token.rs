// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

const TOKEN_TYPE: &str = "Bearer";

const ACCESS_TOKEN_CODE: &str = r#"
    user({uid}, {uname});
    superuser({superuser});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
"#;

/// Any token carrying a user fact passes once its time checks hold.
const ALLOW_POLICY: &str = "allow if user($id, $name)";

/// Issues and verifies Ed25519 signed biscuit access tokens.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }

    fn seal(
        &self,
        subject: &TokenSubject,
        issued_at: SystemTime,
        expires_at: SystemTime,
    ) -> ApplicationResult<String> {
        let params: HashMap<String, Term> = HashMap::from([
            ("uid".to_string(), i64::from(subject.user_id).into()),
            ("uname".to_string(), subject.username.clone().into()),
            ("superuser".to_string(), subject.is_superuser.into()),
            ("issued".to_string(), issued_at.into()),
            ("exp".to_string(), expires_at.into()),
        ]);

        let token = Biscuit::builder()
            .code_with_params(ACCESS_TOKEN_CODE, params, HashMap::new())
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(self.root.as_ref())
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        token
            .seal()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .to_base64()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;
        let token = self.seal(&subject, issued_at, expires_at)?;

        tracing::debug!(user_id = %subject.user_id, "access token issued");
        Ok(AuthTokenDto {
            token,
            token_type: TOKEN_TYPE.to_string(),
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|_| ApplicationError::unauthorized("invalid token"))?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .policy(ALLOW_POLICY)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        authorizer
            .authorize()
            .map_err(|_| ApplicationError::unauthorized("token expired or invalid"))?;

        let (facts, _, _, _) = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?
            .dump();
        super::claims::parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    const KEY: &str = "5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a";

    fn subject(is_superuser: bool) -> TokenSubject {
        TokenSubject {
            user_id: UserId(42),
            username: "alice".into(),
            is_superuser,
        }
    }

    #[tokio::test]
    async fn issued_tokens_authenticate() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(600)).unwrap();
        let issued = manager.issue(subject(true)).await.unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 600);

        let user = manager.authenticate(&issued.token).await.unwrap();
        assert_eq!(user.id, UserId(42));
        assert_eq!(user.username, "alice");
        assert!(user.is_superuser);
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(600)).unwrap();
        let issued_at = SystemTime::now() - Duration::from_secs(3600);
        let expires_at = issued_at + Duration::from_secs(60);
        let token = manager.seal(&subject(false), issued_at, expires_at).unwrap();

        assert!(matches!(
            manager.authenticate(&token).await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn tokens_from_another_key_are_rejected() {
        let issuer = BiscuitTokenManager::new(KEY, Duration::from_secs(600)).unwrap();
        let other = BiscuitTokenManager::new(
            "7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b7b",
            Duration::from_secs(600),
        )
        .unwrap();
        let issued = issuer.issue(subject(false)).await.unwrap();
        assert!(matches!(
            other.authenticate(&issued.token).await,
            Err(ApplicationError::Unauthorized(_))
        ));
        assert!(other.authenticate("garbage").await.is_err());
    }
}
