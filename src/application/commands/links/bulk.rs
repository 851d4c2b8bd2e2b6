use super::{LinkCommandService, LinkInput};
use crate::{
    application::{
        dto::{AuthenticatedUser, LinkDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        link::LinkId,
        organization::OrganizationId,
    },
};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Fields applied to every selected link; absent fields stay untouched.
#[derive(Debug, Clone, Default)]
pub struct BulkUpdateLinksCommand {
    pub link_ids: Vec<i64>,
    pub is_active: Option<bool>,
    pub campaign_id: Option<Option<i64>>,
    pub tags: Option<Option<String>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub redirect_type: Option<i32>,
    pub track_activity: Option<bool>,
    pub utm_source: Option<Option<String>>,
    pub utm_medium: Option<Option<String>>,
    pub utm_campaign: Option<Option<String>>,
    pub utm_term: Option<Option<String>>,
    pub utm_content: Option<Option<String>>,
}

impl BulkUpdateLinksCommand {
    fn as_input(&self) -> LinkInput {
        LinkInput {
            is_active: self.is_active,
            campaign_id: self.campaign_id,
            tags: self.tags.clone(),
            expires_at: self.expires_at,
            redirect_type: self.redirect_type,
            track_activity: self.track_activity,
            utm_source: self.utm_source.clone(),
            utm_medium: self.utm_medium.clone(),
            utm_campaign: self.utm_campaign.clone(),
            utm_term: self.utm_term.clone(),
            utm_content: self.utm_content.clone(),
            ..LinkInput::default()
        }
    }
}

impl LinkCommandService {
    /// Ids outside the caller's reach are ignored rather than rejected.
    /// Changes for every selected link are resolved before any is written.
    pub async fn bulk_update(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        command: BulkUpdateLinksCommand,
    ) -> ApplicationResult<Vec<LinkDto>> {
        let ctx = self.contexts.resolve(actor, org).await?;
        ctx.require_link_manager("update")?;

        let input = command.as_input();
        let mut planned = Vec::new();
        for raw_id in &command.link_ids {
            let Ok(id) = LinkId::new(*raw_id) else {
                continue;
            };
            let Some(link) = self.read_repo.find_by_id(id).await? else {
                continue;
            };
            let reachable = !link.is_deleted
                && link.org_id == ctx.org_id()
                && (ctx.is_manager() || link.owner_id == ctx.user_id());
            if !reachable {
                continue;
            }
            let changes = self.build_changes(&ctx, &link, input.clone()).await?;
            planned.push((link, changes));
        }

        let mut updated = Vec::with_capacity(planned.len());
        for (link, changes) in planned {
            if changes.is_empty() {
                updated.push(LinkDto::from(link));
                continue;
            }
            let fields = changes.changed_field_names().join(", ");
            let link = self.write_repo.update(link.id, changes).await?;

            self.audit
                .record(
                    &ctx,
                    AuditAction::Update,
                    AuditTarget::Link,
                    Some(link.id.into()),
                    format!("Bulk edit /{}: updated {fields}", link.short_code),
                    json!({ "short_code": link.short_code.as_str(), "bulk_update": true }),
                )
                .await?;
            updated.push(LinkDto::from(link));
        }

        tracing::info!(org_id = %ctx.org_id(), count = updated.len(), "links bulk updated");
        Ok(updated)
    }
}
