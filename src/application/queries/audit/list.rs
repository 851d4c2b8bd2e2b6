use super::AuditQueryService;
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser},
        error::ApplicationResult,
        queries::clamp_limit,
    },
    domain::{audit::AuditFilter, organization::OrganizationId, user::UserId},
};
use std::collections::{BTreeSet, HashMap};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 200;

#[derive(Debug, Default)]
pub struct ListAuditLogsQuery {
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl AuditQueryService {
    /// Newest first. Members only see entries they produced.
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let filter = AuditFilter {
            action: query.action.filter(|a| !a.is_empty()),
            target_type: query.target_type.filter(|t| !t.is_empty()),
            user_id: ctx.owner_filter(),
        };
        let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let logs = self
            .repo
            .list(ctx.org_id(), &filter, query.skip.unwrap_or(0), limit)
            .await?;

        let user_ids: Vec<UserId> = logs
            .iter()
            .filter_map(|log| log.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let usernames: HashMap<UserId, String> = self
            .user_repo
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.username.to_string()))
            .collect();

        Ok(logs
            .into_iter()
            .map(|log| {
                let username = log.user_id.and_then(|id| usernames.get(&id).cloned());
                AuditLogDto::from_parts(log, username)
            })
            .collect())
    }
}
