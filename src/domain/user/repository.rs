use crate::domain::errors::DomainResult;
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{AccessRequestStatus, Email, UserId, Username},
};
use async_trait::async_trait;

/// Outcome of [`UserRepository::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    /// Set when this was the first account of the install.
    pub bootstrap_org: Option<Organization>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts `new_user`. When no account exists yet the user is promoted to
    /// superuser and becomes owner of `bootstrap_org`; the emptiness check and
    /// every insert commit together or not at all.
    async fn register(
        &self,
        new_user: NewUser,
        bootstrap_org: NewOrganization,
    ) -> DomainResult<Registration>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn find_by_external_id(&self, external_id: &str) -> DomainResult<Option<User>>;

    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>>;

    async fn list_by_request_status(&self, status: AccessRequestStatus)
    -> DomainResult<Vec<User>>;

    async fn update(&self, update: UserUpdate) -> DomainResult<User>;
}
