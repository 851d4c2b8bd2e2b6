// tests/support/mocks/org_repos.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use linkforge::domain::errors::{DomainError, DomainResult};
use linkforge::domain::organization::{
    Invite, InviteId, InviteRepository, InviteStatus, MemberRole, Membership,
    MembershipRepository, NewInvite, NewOrganization, Organization, OrganizationId,
    OrganizationRepository, OrganizationSlug, OrganizationStats, OrganizationUpdate,
};
use linkforge::domain::user::UserId;

#[derive(Clone)]
pub struct MemoryOrganizationRepo(pub MemoryStore);

#[async_trait]
impl OrganizationRepository for MemoryOrganizationRepo {
    async fn insert(&self, new_org: NewOrganization) -> DomainResult<Organization> {
        let mut tables = self.0.lock();
        if tables.organizations.iter().any(|o| o.slug == new_org.slug) {
            return Err(DomainError::Conflict("slug taken".into()));
        }
        let org = Organization {
            id: OrganizationId(tables.next_id("organizations")),
            name: new_org.name,
            slug: new_org.slug,
            plan: new_org.plan,
            is_active: true,
            is_link_privacy_enabled: true,
            allow_member_delete: true,
            allow_member_edit: true,
            created_at: new_org.created_at,
        };
        tables.organizations.push(org.clone());
        Ok(org)
    }

    async fn find_by_id(&self, id: OrganizationId) -> DomainResult<Option<Organization>> {
        Ok(self
            .0
            .lock()
            .organizations
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn slug_exists(&self, slug: &OrganizationSlug) -> DomainResult<bool> {
        Ok(self.0.lock().organizations.iter().any(|o| &o.slug == slug))
    }

    async fn update(&self, update: OrganizationUpdate) -> DomainResult<Organization> {
        let mut tables = self.0.lock();
        let org = tables
            .organizations
            .iter_mut()
            .find(|o| o.id == update.id)
            .ok_or_else(|| DomainError::NotFound("Organization not found".into()))?;
        if let Some(name) = update.name {
            org.name = name;
        }
        if let Some(slug) = update.slug {
            org.slug = slug;
        }
        if let Some(flag) = update.is_link_privacy_enabled {
            org.is_link_privacy_enabled = flag;
        }
        if let Some(flag) = update.allow_member_delete {
            org.allow_member_delete = flag;
        }
        if let Some(flag) = update.allow_member_edit {
            org.allow_member_edit = flag;
        }
        Ok(org.clone())
    }

    async fn list_all(&self) -> DomainResult<Vec<Organization>> {
        Ok(self.0.lock().organizations.clone())
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Organization>> {
        let tables = self.0.lock();
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| tables.organizations.iter().find(|o| o.id == m.org_id))
            .cloned()
            .collect())
    }

    async fn find_bootstrap(&self) -> DomainResult<Option<Organization>> {
        Ok(self
            .0
            .lock()
            .organizations
            .iter()
            .min_by_key(|o| o.id)
            .cloned())
    }

    async fn stats(&self, id: OrganizationId) -> DomainResult<OrganizationStats> {
        let tables = self.0.lock();
        let links: Vec<_> = tables
            .links
            .iter()
            .filter(|l| l.org_id == id && !l.is_deleted)
            .collect();
        Ok(OrganizationStats {
            member_count: tables.memberships.iter().filter(|m| m.org_id == id).count() as i64,
            link_count: links.len() as i64,
            active_links: links.iter().filter(|l| l.is_active).count() as i64,
            campaign_count: tables.campaigns.iter().filter(|c| c.org_id == id).count() as i64,
            total_clicks: links.iter().map(|l| l.clicks).sum(),
        })
    }
}

#[derive(Clone)]
pub struct MemoryMembershipRepo(pub MemoryStore);

#[async_trait]
impl MembershipRepository for MemoryMembershipRepo {
    async fn insert(&self, membership: Membership) -> DomainResult<Membership> {
        let mut tables = self.0.lock();
        if tables
            .memberships
            .iter()
            .any(|m| m.user_id == membership.user_id && m.org_id == membership.org_id)
        {
            return Err(DomainError::Conflict("membership exists".into()));
        }
        tables.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn find(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
    ) -> DomainResult<Option<Membership>> {
        Ok(self
            .0
            .lock()
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.org_id == org_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Membership>> {
        Ok(self
            .0
            .lock()
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_for_org(&self, org_id: OrganizationId) -> DomainResult<Vec<Membership>> {
        Ok(self
            .0
            .lock()
            .memberships
            .iter()
            .filter(|m| m.org_id == org_id)
            .cloned()
            .collect())
    }

    async fn update_role(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
        role: MemberRole,
    ) -> DomainResult<Membership> {
        let mut tables = self.0.lock();
        let membership = tables
            .memberships
            .iter_mut()
            .find(|m| m.user_id == user_id && m.org_id == org_id)
            .ok_or_else(|| DomainError::NotFound("Member not found".into()))?;
        membership.role = role;
        Ok(membership.clone())
    }

    async fn demote_owners(&self, org_id: OrganizationId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        for m in tables
            .memberships
            .iter_mut()
            .filter(|m| m.org_id == org_id && m.role == MemberRole::Owner)
        {
            m.role = MemberRole::Admin;
        }
        Ok(())
    }

    async fn remove(&self, user_id: UserId, org_id: OrganizationId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let before = tables.memberships.len();
        tables
            .memberships
            .retain(|m| !(m.user_id == user_id && m.org_id == org_id));
        if tables.memberships.len() == before {
            return Err(DomainError::NotFound("Member not found".into()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct MemoryInviteRepo(pub MemoryStore);

#[async_trait]
impl InviteRepository for MemoryInviteRepo {
    async fn insert(&self, invite: NewInvite) -> DomainResult<Invite> {
        let mut tables = self.0.lock();
        let invite = Invite {
            id: InviteId(tables.next_id("invites")),
            org_id: invite.org_id,
            invited_by: invite.invited_by,
            email: invite.email,
            role: invite.role,
            token: invite.token,
            status: InviteStatus::Pending,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
        };
        tables.invites.push(invite.clone());
        Ok(invite)
    }

    async fn find_by_id(&self, id: InviteId) -> DomainResult<Option<Invite>> {
        Ok(self.0.lock().invites.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Invite>> {
        Ok(self
            .0
            .lock()
            .invites
            .iter()
            .find(|i| i.token == token)
            .cloned())
    }

    async fn list_pending(&self, org_id: OrganizationId) -> DomainResult<Vec<Invite>> {
        let mut pending: Vec<_> = self
            .0
            .lock()
            .invites
            .iter()
            .filter(|i| i.org_id == org_id && i.status == InviteStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(pending)
    }

    async fn set_status(&self, id: InviteId, status: InviteStatus) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let invite = tables
            .invites
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DomainError::NotFound("Invite not found".into()))?;
        invite.status = status;
        Ok(())
    }
}
