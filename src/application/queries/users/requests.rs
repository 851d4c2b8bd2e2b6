use super::UserQueryService;
use crate::{
    application::{
        context::{ensure_superuser, load_active_user},
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
    },
    domain::user::AccessRequestStatus,
};

impl UserQueryService {
    pub async fn list_access_requests(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<UserDto>> {
        let reviewer = load_active_user(self.user_repo.as_ref(), actor.id).await?;
        ensure_superuser(&reviewer)?;

        let pending = self
            .user_repo
            .list_by_request_status(AccessRequestStatus::Pending)
            .await?;
        Ok(pending.into_iter().map(Into::into).collect())
    }
}
