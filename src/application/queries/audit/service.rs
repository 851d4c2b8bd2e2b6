use std::sync::Arc;

use crate::{
    application::context::ContextResolver,
    domain::{audit::AuditLogRepository, user::UserRepository},
};

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) contexts: ContextResolver,
}

impl AuditQueryService {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        user_repo: Arc<dyn UserRepository>,
        contexts: ContextResolver,
    ) -> Self {
        Self {
            repo,
            user_repo,
            contexts,
        }
    }
}
