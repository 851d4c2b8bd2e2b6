// src/domain/organization/repository.rs
use super::{
    entity::{
        Invite, Membership, NewInvite, NewOrganization, Organization, OrganizationStats,
        OrganizationUpdate,
    },
    value_objects::{InviteId, InviteStatus, MemberRole, OrganizationId, OrganizationSlug},
};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn insert(&self, new_org: NewOrganization) -> DomainResult<Organization>;

    async fn find_by_id(&self, id: OrganizationId) -> DomainResult<Option<Organization>>;

    async fn slug_exists(&self, slug: &OrganizationSlug) -> DomainResult<bool>;

    async fn update(&self, update: OrganizationUpdate) -> DomainResult<Organization>;

    async fn list_all(&self) -> DomainResult<Vec<Organization>>;

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Organization>>;

    /// The organization created when the first account registered.
    async fn find_bootstrap(&self) -> DomainResult<Option<Organization>>;

    async fn stats(&self, id: OrganizationId) -> DomainResult<OrganizationStats>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn insert(&self, membership: Membership) -> DomainResult<Membership>;

    async fn find(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
    ) -> DomainResult<Option<Membership>>;

    /// Ordered by `joined_at` ascending.
    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Membership>>;

    async fn list_for_org(&self, org_id: OrganizationId) -> DomainResult<Vec<Membership>>;

    async fn update_role(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
        role: MemberRole,
    ) -> DomainResult<Membership>;

    /// Every current owner of `org_id` becomes an admin.
    async fn demote_owners(&self, org_id: OrganizationId) -> DomainResult<()>;

    async fn remove(&self, user_id: UserId, org_id: OrganizationId) -> DomainResult<()>;
}

#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn insert(&self, invite: NewInvite) -> DomainResult<Invite>;

    async fn find_by_id(&self, id: InviteId) -> DomainResult<Option<Invite>>;

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Invite>>;

    async fn list_pending(&self, org_id: OrganizationId) -> DomainResult<Vec<Invite>>;

    async fn set_status(&self, id: InviteId, status: InviteStatus) -> DomainResult<()>;
}
