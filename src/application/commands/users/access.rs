use super::UserCommandService;
use crate::{
    application::{
        context::{ensure_superuser, load_active_user},
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        organization::{MemberRole, Membership},
        user::{AccessRequestStatus, User, UserId, UserUpdate},
    },
};

pub struct ReviewAccessCommand {
    pub user_id: i64,
}

impl UserCommandService {
    pub async fn request_access(&self, actor: &AuthenticatedUser) -> ApplicationResult<UserDto> {
        let user = load_active_user(self.user_repo.as_ref(), actor.id).await?;
        if user.is_approved {
            return Err(ApplicationError::validation("User is already approved"));
        }
        if user.request_status == AccessRequestStatus::Pending {
            return Err(ApplicationError::validation("Access request already pending"));
        }

        let updated = self
            .user_repo
            .update(UserUpdate::new(user.id).with_request_status(AccessRequestStatus::Pending))
            .await?;
        tracing::info!(user_id = %user.id, "access requested");
        Ok(updated.into())
    }

    pub async fn approve(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewAccessCommand,
    ) -> ApplicationResult<UserDto> {
        let target = self.load_review_target(actor, command).await?;
        let updated = self
            .user_repo
            .update(
                UserUpdate::new(target.id)
                    .with_is_approved(true)
                    .with_request_status(AccessRequestStatus::Approved),
            )
            .await?;

        self.ensure_default_membership(&updated).await?;
        tracing::info!(user_id = %updated.id, approver = %actor.id, "access approved");
        Ok(updated.into())
    }

    pub async fn reject(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewAccessCommand,
    ) -> ApplicationResult<UserDto> {
        let target = self.load_review_target(actor, command).await?;
        let updated = self
            .user_repo
            .update(
                UserUpdate::new(target.id)
                    .with_is_approved(false)
                    .with_request_status(AccessRequestStatus::Rejected),
            )
            .await?;
        tracing::info!(user_id = %updated.id, reviewer = %actor.id, "access rejected");
        Ok(updated.into())
    }

    async fn load_review_target(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewAccessCommand,
    ) -> ApplicationResult<User> {
        let reviewer = load_active_user(self.user_repo.as_ref(), actor.id).await?;
        ensure_superuser(&reviewer)?;
        let id = UserId::new(command.user_id)?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User not found"))
    }

    /// Approved users without any organization join the bootstrap organization.
    async fn ensure_default_membership(&self, user: &User) -> ApplicationResult<()> {
        if !self.membership_repo.list_for_user(user.id).await?.is_empty() {
            return Ok(());
        }
        let Some(org) = self.org_repo.find_bootstrap().await? else {
            tracing::warn!(user_id = %user.id, "no bootstrap organization to join");
            return Ok(());
        };
        self.membership_repo
            .insert(Membership {
                user_id: user.id,
                org_id: org.id,
                role: MemberRole::Member,
                joined_at: self.clock.now(),
            })
            .await?;
        Ok(())
    }
}
