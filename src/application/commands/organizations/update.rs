use super::OrganizationCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, OrganizationDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        organization::{MemberRole, OrganizationId, OrganizationName, OrganizationUpdate},
    },
};
use serde_json::json;

#[derive(Debug, Default)]
pub struct UpdateOrganizationCommand {
    pub name: Option<String>,
    pub is_link_privacy_enabled: Option<bool>,
    pub allow_member_delete: Option<bool>,
    pub allow_member_edit: Option<bool>,
}

impl OrganizationCommandService {
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
        command: UpdateOrganizationCommand,
    ) -> ApplicationResult<OrganizationDto> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        ctx.require_role(MemberRole::Admin)?;

        let mut update = OrganizationUpdate::new(ctx.org_id());
        let mut changed = Vec::new();
        if let Some(name) = command.name {
            let name = OrganizationName::new(name)?;
            if name != ctx.org.name {
                let slug = self.unique_slug(name.as_str(), Some(&ctx.org.slug)).await?;
                update = update.with_name(name, slug);
                changed.push("name");
            }
        }
        if let Some(flag) = command.is_link_privacy_enabled {
            update.is_link_privacy_enabled = Some(flag);
            changed.push("link privacy");
        }
        if let Some(flag) = command.allow_member_delete {
            update.allow_member_delete = Some(flag);
            changed.push("member delete");
        }
        if let Some(flag) = command.allow_member_edit {
            update.allow_member_edit = Some(flag);
            changed.push("member edit");
        }

        if update.is_empty() {
            return Ok(ctx.org.into());
        }

        let org = self.org_repo.update(update).await?;
        self.audit
            .record(
                &ctx,
                AuditAction::Update,
                AuditTarget::Organization,
                Some(org.id.into()),
                format!("Updated organization '{}': {}", org.name, changed.join(", ")),
                json!({ "fields": changed }),
            )
            .await?;

        tracing::info!(org_id = %org.id, "organization updated");
        Ok(org.into())
    }
}
