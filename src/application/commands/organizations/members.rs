use super::OrganizationCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, MembershipDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        organization::{MemberRole, OrganizationId},
        user::UserId,
    },
};
use serde_json::json;

pub struct ChangeRoleCommand {
    pub role: String,
}

impl OrganizationCommandService {
    pub async fn remove_member(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
        user_id: UserId,
    ) -> ApplicationResult<()> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Admin)?;

        let membership = self
            .membership_repo
            .find(user_id, ctx.org_id())
            .await?
            .ok_or_else(|| ApplicationError::not_found("Member not found"))?;
        if membership.role == MemberRole::Owner {
            return Err(ApplicationError::validation("Cannot remove the owner"));
        }

        self.membership_repo.remove(user_id, ctx.org_id()).await?;
        let username = self.member_label(user_id).await?;
        self.audit
            .record(
                &ctx,
                AuditAction::Remove,
                AuditTarget::Member,
                Some(user_id.into()),
                format!("Removed {username} from the organization"),
                json!({ "user_id": i64::from(user_id), "role": membership.role }),
            )
            .await?;

        tracing::info!(org_id = %ctx.org_id(), user_id = %user_id, "member removed");
        Ok(())
    }

    pub async fn change_role(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
        user_id: UserId,
        command: ChangeRoleCommand,
    ) -> ApplicationResult<MembershipDto> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Owner)?;
        let role: MemberRole = command.role.parse()?;

        let current = self
            .membership_repo
            .find(user_id, ctx.org_id())
            .await?
            .ok_or_else(|| ApplicationError::not_found("Member not found"))?;

        if role == MemberRole::Owner {
            self.membership_repo.demote_owners(ctx.org_id()).await?;
        }
        let updated = self
            .membership_repo
            .update_role(user_id, ctx.org_id(), role)
            .await?;

        let username = self.member_label(user_id).await?;
        self.audit
            .record(
                &ctx,
                AuditAction::ChangeRole,
                AuditTarget::Member,
                Some(user_id.into()),
                format!("Changed role of {username}: {} → {role}", current.role),
                json!({ "old_role": current.role, "new_role": role }),
            )
            .await?;

        tracing::info!(org_id = %ctx.org_id(), user_id = %user_id, role = %role, "member role changed");
        Ok(updated.into())
    }

    pub(super) async fn member_label(&self, user_id: UserId) -> ApplicationResult<String> {
        Ok(self
            .user_repo
            .find_by_id(user_id)
            .await?
            .map(|u| u.username.to_string())
            .unwrap_or_else(|| format!("user #{user_id}")))
    }
}
