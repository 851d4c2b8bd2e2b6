// tests/support/mocks/user_repo.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use linkforge::domain::errors::{DomainError, DomainResult};
use linkforge::domain::organization::{
    MemberRole, Membership, NewOrganization, Organization, OrganizationId,
};
use linkforge::domain::user::{
    AccessRequestStatus, Email, NewUser, Registration, User, UserId, UserRepository, UserUpdate,
    Username,
};

#[derive(Clone)]
pub struct MemoryUserRepo(pub MemoryStore);

#[async_trait]
impl UserRepository for MemoryUserRepo {
    /// 1 回のロックの中で初回判定・ユーザー・組織・メンバーシップをまとめて書き込む
    async fn register(
        &self,
        new_user: NewUser,
        bootstrap_org: NewOrganization,
    ) -> DomainResult<Registration> {
        let mut tables = self.0.lock();
        if tables.users.iter().any(|u| {
            u.username == new_user.username
                || u.email == new_user.email
                || (new_user.external_id.is_some() && u.external_id == new_user.external_id)
        }) {
            return Err(DomainError::Conflict("user already exists".into()));
        }
        let is_first = tables.users.is_empty();
        let new_user = if is_first {
            new_user.into_bootstrap_superuser()
        } else {
            new_user
        };
        if is_first && tables.organizations.iter().any(|o| o.slug == bootstrap_org.slug) {
            return Err(DomainError::Conflict("slug taken".into()));
        }

        let user = User {
            id: UserId(tables.next_id("users")),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            avatar_url: new_user.avatar_url,
            external_id: new_user.external_id,
            password_hash: new_user.password_hash,
            is_active: true,
            is_superuser: new_user.is_superuser,
            is_approved: new_user.is_approved,
            request_status: new_user.request_status,
            created_at: new_user.created_at,
        };
        tables.users.push(user.clone());

        let bootstrap_org = is_first.then(|| {
            let org = Organization {
                id: OrganizationId(tables.next_id("organizations")),
                name: bootstrap_org.name,
                slug: bootstrap_org.slug,
                plan: bootstrap_org.plan,
                is_active: true,
                is_link_privacy_enabled: true,
                allow_member_delete: true,
                allow_member_edit: true,
                created_at: bootstrap_org.created_at,
            };
            tables.organizations.push(org.clone());
            tables.memberships.push(Membership {
                user_id: user.id,
                org_id: org.id,
                role: MemberRole::Owner,
                joined_at: bootstrap_org.created_at,
            });
            org
        });

        Ok(Registration {
            user,
            bootstrap_org,
        })
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> DomainResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn list_by_request_status(
        &self,
        status: AccessRequestStatus,
    ) -> DomainResult<Vec<User>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .filter(|u| u.request_status == status)
            .cloned()
            .collect())
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut tables = self.0.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(is_approved) = update.is_approved {
            user.is_approved = is_approved;
        }
        if let Some(status) = update.request_status {
            user.request_status = status;
        }
        if let Some(profile) = update.profile {
            user.external_id = Some(profile.external_id);
            user.username = profile.username;
            user.email = profile.email;
            user.full_name = profile.full_name;
            user.avatar_url = profile.avatar_url;
        }
        Ok(user.clone())
    }
}
