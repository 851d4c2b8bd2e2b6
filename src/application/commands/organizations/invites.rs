use super::OrganizationCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, InviteDto, MembershipDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        organization::{
            InviteId, InviteStatus, MemberRole, Membership, NewInvite, OrganizationId,
        },
        user::Email,
    },
};
use serde_json::json;

pub struct CreateInviteCommand {
    pub email: String,
    pub role: String,
}

pub struct AcceptInviteCommand {
    pub token: String,
}

impl OrganizationCommandService {
    pub async fn create_invite(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
        command: CreateInviteCommand,
    ) -> ApplicationResult<InviteDto> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Admin)?;

        let email = Email::new(command.email)?;
        let role: MemberRole = command.role.parse()?;
        if role == MemberRole::Owner && !ctx.has_role(MemberRole::Owner) {
            return Err(ApplicationError::forbidden("Only owners can invite owners"));
        }

        if let Some(existing) = self.user_repo.find_by_email(&email).await?
            && self
                .membership_repo
                .find(existing.id, ctx.org_id())
                .await?
                .is_some()
        {
            return Err(ApplicationError::validation("User is already a member"));
        }

        let invite = self
            .invite_repo
            .insert(NewInvite::new(
                ctx.org_id(),
                ctx.user_id(),
                email,
                role,
                self.invite_tokens.generate(),
                self.clock.now(),
            ))
            .await?;

        self.audit
            .record(
                &ctx,
                AuditAction::Invite,
                AuditTarget::Invite,
                Some(invite.id.into()),
                format!("Invited {} as {role}", invite.email),
                json!({ "email": invite.email.as_str(), "role": role }),
            )
            .await?;

        tracing::info!(org_id = %ctx.org_id(), role = %role, "invite created");
        Ok(invite.into())
    }

    pub async fn revoke_invite(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
        invite_id: InviteId,
    ) -> ApplicationResult<()> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Admin)?;

        let invite = self
            .invite_repo
            .find_by_id(invite_id)
            .await?
            .filter(|invite| invite.org_id == ctx.org_id())
            .ok_or_else(|| ApplicationError::not_found("Invite not found"))?;

        self.invite_repo
            .set_status(invite.id, InviteStatus::Revoked)
            .await?;
        self.audit
            .record(
                &ctx,
                AuditAction::Revoke,
                AuditTarget::Invite,
                Some(invite.id.into()),
                format!("Revoked invite for {}", invite.email),
                json!({ "email": invite.email.as_str() }),
            )
            .await?;
        Ok(())
    }

    pub async fn accept_invite(
        &self,
        actor: &AuthenticatedUser,
        command: AcceptInviteCommand,
    ) -> ApplicationResult<MembershipDto> {
        let user = self.contexts.load_user(actor).await?;
        let invite = self
            .invite_repo
            .find_by_token(command.token.trim())
            .await?
            .ok_or_else(|| ApplicationError::not_found("Invite not found"))?;

        if invite.status != InviteStatus::Pending {
            return Err(ApplicationError::validation("Invite is no longer valid"));
        }
        let now = self.clock.now();
        if invite.is_expired(now) {
            self.invite_repo
                .set_status(invite.id, InviteStatus::Expired)
                .await?;
            return Err(ApplicationError::validation("Invite has expired"));
        }
        if invite.email != user.email {
            return Err(ApplicationError::forbidden(
                "This invite was sent to a different email address",
            ));
        }
        if self
            .membership_repo
            .find(user.id, invite.org_id)
            .await?
            .is_some()
        {
            return Err(ApplicationError::validation("Already a member"));
        }

        if invite.role == MemberRole::Owner {
            self.membership_repo.demote_owners(invite.org_id).await?;
        }
        let membership = self
            .membership_repo
            .insert(Membership {
                user_id: user.id,
                org_id: invite.org_id,
                role: invite.role,
                joined_at: now,
            })
            .await?;
        self.invite_repo
            .set_status(invite.id, InviteStatus::Accepted)
            .await?;

        tracing::info!(org_id = %invite.org_id, user_id = %user.id, "invite accepted");
        Ok(membership.into())
    }
}
