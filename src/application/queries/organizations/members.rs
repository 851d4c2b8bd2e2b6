use super::OrganizationQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, InviteDto, MemberDto},
        error::ApplicationResult,
    },
    domain::{
        organization::{MemberRole, OrganizationId},
        user::UserId,
    },
};

impl OrganizationQueryService {
    pub async fn list_members(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
    ) -> ApplicationResult<Vec<MemberDto>> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        let memberships = self.membership_repo.list_for_org(ctx.org_id()).await?;
        let ids: Vec<UserId> = memberships.iter().map(|m| m.user_id).collect();
        let users = self.user_repo.find_many(&ids).await?;

        Ok(memberships
            .into_iter()
            .filter_map(|membership| {
                users
                    .iter()
                    .find(|user| user.id == membership.user_id)
                    .cloned()
                    .map(|user| MemberDto::from_parts(membership, user))
            })
            .collect())
    }

    /// Pending invites only.
    pub async fn list_invites(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
    ) -> ApplicationResult<Vec<InviteDto>> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Admin)?;
        let invites = self.invite_repo.list_pending(ctx.org_id()).await?;
        Ok(invites.into_iter().map(Into::into).collect())
    }
}
