use super::{LoginResult, UserCommandService, service::ExternalLogin};
use crate::{
    application::{
        dto::TokenSubject,
        error::{ApplicationError, ApplicationResult},
        ports::identity::ExternalIdentity,
    },
    domain::user::{Email, NewUser, User, UserProfile, UserUpdate, Username},
};
use chrono::Duration;

/// How long a sign-in may take between leaving for the provider and coming back.
const LOGIN_STATE_TTL_MINUTES: i64 = 10;

pub struct ExternalCallbackCommand {
    pub code: String,
    pub state: String,
}

impl UserCommandService {
    fn external(&self) -> ApplicationResult<&ExternalLogin> {
        self.external_login
            .as_ref()
            .ok_or_else(|| ApplicationError::not_found("External sign-in is not configured"))
    }

    /// Returns the provider URL to send the browser to.
    pub async fn begin_external_login(&self) -> ApplicationResult<String> {
        let external = self.external()?;
        let state = external.secrets.generate();
        let expires_at = self.clock.now() + Duration::minutes(LOGIN_STATE_TTL_MINUTES);
        external.states.save(&state, expires_at).await?;
        external.provider.authorization_url(&state)
    }

    pub async fn complete_external_login(
        &self,
        command: ExternalCallbackCommand,
    ) -> ApplicationResult<LoginResult> {
        let external = self.external()?;
        if !external
            .states
            .consume(&command.state, self.clock.now())
            .await?
        {
            return Err(ApplicationError::validation(
                "Invalid or expired login state",
            ));
        }

        let identity = external.provider.identify(&command.code).await?;
        let user = self.upsert_external_user(identity).await?;
        if !user.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        let token = self.token_manager.issue(TokenSubject::from(&user)).await?;
        tracing::info!(user_id = %user.id, "user signed in through identity provider");

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    /// Known subjects get their profile refreshed. An unknown subject whose
    /// email matches a local account is linked to it; otherwise a new account
    /// is created.
    async fn upsert_external_user(&self, identity: ExternalIdentity) -> ApplicationResult<User> {
        let username = Username::new(identity.username)?;
        let email = Email::new(identity.email)?;
        let profile = UserProfile {
            external_id: identity.subject.clone(),
            username: username.clone(),
            email: email.clone(),
            full_name: identity.full_name.clone(),
            avatar_url: identity.avatar_url.clone(),
        };

        let existing = match self.user_repo.find_by_external_id(&identity.subject).await? {
            Some(user) => Some(user),
            None => self.user_repo.find_by_email(&email).await?,
        };
        if let Some(user) = existing {
            if user
                .external_id
                .as_deref()
                .is_some_and(|linked| linked != identity.subject)
            {
                return Err(ApplicationError::conflict(
                    "email already linked to another account",
                ));
            }
            let user = self
                .user_repo
                .update(UserUpdate::new(user.id).with_profile(profile))
                .await?;
            return Ok(user);
        }

        let new_user = NewUser::external(identity.subject, username, email, self.clock.now())
            .with_full_name(identity.full_name)
            .with_avatar_url(identity.avatar_url);
        let user = self.insert_account(new_user).await?;
        tracing::info!(user_id = %user.id, superuser = user.is_superuser, "user registered through identity provider");
        Ok(user)
    }
}
