use super::{
    LinkCommandService, LinkInput,
    service::LinkMutation,
};
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
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        link_id: i64,
        input: LinkInput,
    ) -> ApplicationResult<LinkDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        ctx.require_link_manager("update")?;
        let current = self
            .load_for_mutation(&ctx, link_id, LinkMutation::Edit)
            .await?;

        let changes = self.build_changes(&ctx, &current, input).await?;
        let updated = if changes.is_empty() {
            current.clone()
        } else {
            self.write_repo.update(current.id, changes).await?
        };

        let described = current.describe_changes(&updated);
        let summary = if described.is_empty() {
            format!("Updated /{} (no visible changes)", updated.short_code)
        } else {
            format!("Updated /{}: {}", updated.short_code, described.join(", "))
        };
        self.audit
            .record(
                &ctx,
                AuditAction::Update,
                AuditTarget::Link,
                Some(updated.id.into()),
                summary,
                json!({ "short_code": updated.short_code.as_str() }),
            )
            .await?;

        tracing::info!(link_id = %updated.id, "link updated");
        Ok(updated.into())
    }
}
