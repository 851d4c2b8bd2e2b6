use super::{LinkCommandService, LinkInput};
use crate::{
    application::{
        context::RequestContext,
        dto::{AuthenticatedUser, LinkDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        errors::DomainError,
        link::{Link, NewLink},
        organization::OrganizationId,
    },
};
use serde_json::json;
use std::collections::HashSet;

impl LinkCommandService {
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        input: LinkInput,
    ) -> ApplicationResult<LinkDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        ctx.require_link_manager("create")?;

        let link = self.insert_link(&ctx, input).await?;
        Ok(link.into())
    }

    /// Items whose custom code is already taken are skipped. Every other item
    /// is validated before the first link is written, so an invalid item
    /// leaves the batch uncommitted.
    pub async fn bulk_create(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        inputs: Vec<LinkInput>,
    ) -> ApplicationResult<Vec<LinkDto>> {
        let ctx = self.contexts.resolve(actor, org).await?;
        ctx.require_link_manager("create")?;

        let mut claimed = HashSet::new();
        let mut pending = Vec::with_capacity(inputs.len());
        for input in inputs {
            if let Some(code) = input.custom_code()? {
                if claimed.contains(&code) || self.read_repo.code_exists(&code).await? {
                    tracing::debug!(code = %code, "bulk create skipped duplicate code");
                    continue;
                }
            }
            let new_link = self.build_new_link(&ctx, input).await?;
            if claimed.insert(new_link.short_code.clone()) {
                pending.push(new_link);
            }
        }

        let mut created = Vec::with_capacity(pending.len());
        for new_link in pending {
            match self.store_link(&ctx, new_link).await {
                Ok(link) => created.push(LinkDto::from(link)),
                // taken between validation and write
                Err(ApplicationError::Validation(msg)) if msg == "Short code already exists" => {
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(org_id = %ctx.org_id(), count = created.len(), "links bulk created");
        Ok(created)
    }

    pub(super) async fn insert_link(
        &self,
        ctx: &RequestContext,
        input: LinkInput,
    ) -> ApplicationResult<Link> {
        let new_link = self.build_new_link(ctx, input).await?;
        self.store_link(ctx, new_link).await
    }

    async fn store_link(&self, ctx: &RequestContext, new_link: NewLink) -> ApplicationResult<Link> {
        let link = self
            .write_repo
            .insert(new_link)
            .await
            .map_err(|err| match err {
                DomainError::Conflict(_) => {
                    ApplicationError::validation("Short code already exists")
                }
                other => other.into(),
            })?;

        self.audit
            .record(
                ctx,
                AuditAction::Create,
                AuditTarget::Link,
                Some(link.id.into()),
                format!(
                    "Created link /{} → {}",
                    link.short_code,
                    link.original_url.preview(80)
                ),
                json!({ "short_code": link.short_code.as_str() }),
            )
            .await?;

        tracing::info!(link_id = %link.id, code = %link.short_code, org_id = %link.org_id, "link created");
        Ok(link)
    }
}
