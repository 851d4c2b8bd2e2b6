use std::sync::Arc;

use crate::{
    application::{
        context::load_active_user,
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
    },
    domain::user::UserRepository,
};

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn me(&self, actor: &AuthenticatedUser) -> ApplicationResult<UserDto> {
        let user = load_active_user(self.user_repo.as_ref(), actor.id).await?;
        Ok(user.into())
    }
}
