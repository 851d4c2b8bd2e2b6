use super::{LinkCommandService, service::LinkMutation};
use crate::{
    application::{
        dto::{AuthenticatedUser, LinkDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        organization::OrganizationId,
    },
};
use serde_json::json;

impl LinkCommandService {
    /// Soft delete; the short code stays reserved.
    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        link_id: i64,
    ) -> ApplicationResult<LinkDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let mut link = self
            .load_for_mutation(&ctx, link_id, LinkMutation::Delete)
            .await?;

        self.write_repo.soft_delete(link.id).await?;
        link.is_deleted = true;

        self.audit
            .record(
                &ctx,
                AuditAction::Delete,
                AuditTarget::Link,
                Some(link.id.into()),
                format!(
                    "Deleted /{} → {}",
                    link.short_code,
                    link.original_url.preview(80)
                ),
                json!({ "short_code": link.short_code.as_str() }),
            )
            .await?;

        tracing::info!(link_id = %link.id, "link deleted");
        Ok(link.into())
    }
}
