// src/application/context.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        link::LinkScope,
        organization::{
            MemberRole, MembershipRepository, Organization, OrganizationId, OrganizationRepository,
        },
        user::{User, UserId, UserRepository},
    },
};
use std::sync::Arc;

/// Load the caller's account, rejecting deleted and deactivated users.
pub(crate) async fn load_active_user(
    user_repo: &dyn UserRepository,
    id: UserId,
) -> ApplicationResult<User> {
    let user = user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApplicationError::unauthorized("User not found"))?;
    if !user.is_active {
        return Err(ApplicationError::validation("Inactive user"));
    }
    Ok(user)
}

pub(crate) fn ensure_superuser(user: &User) -> ApplicationResult<()> {
    if user.is_superuser {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "The user doesn't have enough privileges",
        ))
    }
}

/// Builds the [`RequestContext`] for an authenticated caller.
#[derive(Clone)]
pub struct ContextResolver {
    user_repo: Arc<dyn UserRepository>,
    org_repo: Arc<dyn OrganizationRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
}

impl ContextResolver {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            user_repo,
            org_repo,
            membership_repo,
        }
    }

    /// Without an explicit organization the caller's earliest membership is used.
    pub async fn resolve(
        &self,
        actor: &AuthenticatedUser,
        requested: Option<OrganizationId>,
    ) -> ApplicationResult<RequestContext> {
        let user = load_active_user(self.user_repo.as_ref(), actor.id).await?;

        let org_id = match requested {
            Some(id) => id,
            None => self
                .membership_repo
                .list_for_user(user.id)
                .await?
                .first()
                .map(|m| m.org_id)
                .ok_or_else(|| ApplicationError::forbidden("No organization membership"))?,
        };

        let org = self
            .org_repo
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Organization not found"))?;

        let role = self
            .membership_repo
            .find(user.id, org.id)
            .await?
            .map(|m| m.role);
        if role.is_none() && !user.is_superuser {
            return Err(ApplicationError::forbidden(
                "Not a member of this organization",
            ));
        }
        if !org.is_active {
            return Err(ApplicationError::forbidden("Organization is inactive"));
        }

        Ok(RequestContext { user, org, role })
    }

    pub async fn load_user(&self, actor: &AuthenticatedUser) -> ApplicationResult<User> {
        load_active_user(self.user_repo.as_ref(), actor.id).await
    }
}

/// The caller and the organization a request operates on.
///
/// `role` is `None` only for superusers acting in an organization they do
/// not belong to.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: User,
    pub org: Organization,
    pub role: Option<MemberRole>,
}

impl RequestContext {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn org_id(&self) -> OrganizationId {
        self.org.id
    }

    pub fn is_superuser(&self) -> bool {
        self.user.is_superuser
    }

    /// Owners, admins and superusers manage every resource of the organization.
    pub fn is_manager(&self) -> bool {
        self.is_superuser() || self.role.is_some_and(|role| role.is_manager())
    }

    pub fn has_role(&self, required: MemberRole) -> bool {
        self.is_superuser() || self.role.is_some_and(|role| role.at_least(required))
    }

    pub fn require_role(&self, required: MemberRole) -> ApplicationResult<()> {
        if self.has_role(required) {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!(
                "Requires {required} role or higher"
            )))
        }
    }

    pub fn require_link_manager(&self, action: &str) -> ApplicationResult<()> {
        if self.user.can_manage_links() {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!(
                "User not approved to {action} links"
            )))
        }
    }

    /// Links visible to the caller. Members only see their own links while
    /// link privacy is enabled.
    pub fn link_scope(&self) -> LinkScope {
        let sees_all = self.is_manager() || !self.org.is_link_privacy_enabled;
        LinkScope {
            org_id: self.org.id,
            owner_id: (!sees_all).then_some(self.user.id),
        }
    }

    /// Non-managers only act on resources they own.
    pub fn owner_filter(&self) -> Option<UserId> {
        (!self.is_manager()).then_some(self.user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        organization::{OrganizationName, OrganizationSlug, Plan},
        user::{AccessRequestStatus, Email, PasswordHash, Username},
    };
    use chrono::Utc;

    fn context(role: Option<MemberRole>, superuser: bool, privacy: bool) -> RequestContext {
        RequestContext {
            user: User {
                id: UserId(5),
                username: Username::new("member").unwrap(),
                email: Email::new("member@example.com").unwrap(),
                full_name: None,
                avatar_url: None,
                external_id: None,
                password_hash: Some(PasswordHash::new("hash").unwrap()),
                is_active: true,
                is_superuser: superuser,
                is_approved: false,
                request_status: AccessRequestStatus::None,
                created_at: Utc::now(),
            },
            org: Organization {
                id: OrganizationId(1),
                name: OrganizationName::new("Acme").unwrap(),
                slug: OrganizationSlug::new("acme").unwrap(),
                plan: Plan::Free,
                is_active: true,
                is_link_privacy_enabled: privacy,
                allow_member_delete: true,
                allow_member_edit: true,
                created_at: Utc::now(),
            },
            role,
        }
    }

    #[test]
    fn members_only_see_their_links_under_privacy() {
        let ctx = context(Some(MemberRole::Member), false, true);
        assert_eq!(ctx.link_scope().owner_id, Some(UserId(5)));

        let open = context(Some(MemberRole::Member), false, false);
        assert_eq!(open.link_scope().owner_id, None);

        let admin = context(Some(MemberRole::Admin), false, true);
        assert_eq!(admin.link_scope().owner_id, None);
    }

    #[test]
    fn superusers_act_as_managers_without_membership() {
        let ctx = context(None, true, true);
        assert!(ctx.is_manager());
        assert!(ctx.require_role(MemberRole::Owner).is_ok());
        assert!(ctx.require_link_manager("create").is_ok());
    }

    #[test]
    fn unapproved_members_cannot_manage_links() {
        let ctx = context(Some(MemberRole::Owner), false, true);
        let err = ctx.require_link_manager("create").unwrap_err();
        assert_eq!(err.to_string(), "forbidden: User not approved to create links");
        assert!(context(Some(MemberRole::Member), false, true)
            .require_role(MemberRole::Admin)
            .is_err());
    }
}
