use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        organization::{NewOrganization, OrganizationName, OrganizationSlug, Plan},
        user::{Email, NewUser, PasswordHash, User, Username},
    },
};

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl UserCommandService {
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        self.ensure_identity_available(&username, &email).await?;

        let hashed = self.password_hasher.hash(&command.password).await?;
        let new_user = NewUser::new(
            username,
            email,
            PasswordHash::new(hashed)?,
            self.clock.now(),
        )
        .with_full_name(command.full_name);

        let user = self.insert_account(new_user).await?;
        tracing::info!(user_id = %user.id, superuser = user.is_superuser, "user registered");
        Ok(user.into())
    }

    async fn ensure_identity_available(
        &self,
        username: &Username,
        email: &Email,
    ) -> ApplicationResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }
        Ok(())
    }

    /// Stores a new account; the first one on the install also gets the
    /// bootstrap organization.
    pub(super) async fn insert_account(&self, new_user: NewUser) -> ApplicationResult<User> {
        let registration = self
            .user_repo
            .register(new_user, self.bootstrap_organization()?)
            .await?;
        if let Some(org) = &registration.bootstrap_org {
            tracing::info!(org_id = %org.id, slug = %org.slug, "bootstrap organization created");
        }
        Ok(registration.user)
    }

    fn bootstrap_organization(&self) -> ApplicationResult<NewOrganization> {
        let name = OrganizationName::new(self.bootstrap_org_name.clone())?;
        let slug = OrganizationSlug::new(match self.slugger.slugify(name.as_str()) {
            s if s.is_empty() => "org".to_string(),
            s => s,
        })?;
        Ok(NewOrganization {
            name,
            slug,
            plan: Plan::Free,
            created_at: self.clock.now(),
        })
    }
}
