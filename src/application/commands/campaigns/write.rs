use super::{CampaignCommandService, service::load_accessible_campaign};
use crate::{
    application::{
        dto::{AuthenticatedUser, CampaignDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTarget},
        campaign::{CampaignColor, CampaignName, CampaignUpdate, NewCampaign},
        organization::OrganizationId,
    },
};
use serde_json::json;

pub struct CreateCampaignCommand {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateCampaignCommand {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CampaignCommandService {
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        command: CreateCampaignCommand,
    ) -> ApplicationResult<CampaignDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        if !ctx.user.can_manage_links() {
            return Err(ApplicationError::forbidden(
                "User not approved to create campaigns",
            ));
        }

        let name = CampaignName::new(command.name)?;
        let color = match command.color {
            Some(color) => CampaignColor::new(color)?,
            None => CampaignColor::default(),
        };
        let campaign = self
            .campaign_repo
            .insert(NewCampaign {
                name,
                color,
                owner_id: ctx.user_id(),
                org_id: ctx.org_id(),
                created_at: self.clock.now(),
            })
            .await?;

        self.audit
            .record(
                &ctx,
                AuditAction::Create,
                AuditTarget::Campaign,
                Some(campaign.id.into()),
                format!("Created campaign '{}'", campaign.name),
                json!({ "name": campaign.name.as_str() }),
            )
            .await?;
        Ok(campaign.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        campaign_id: i64,
        command: UpdateCampaignCommand,
    ) -> ApplicationResult<CampaignDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let current = load_accessible_campaign(self.campaign_repo.as_ref(), &ctx, campaign_id).await?;

        let update = CampaignUpdate {
            id: current.id,
            name: command.name.map(CampaignName::new).transpose()?,
            color: command.color.map(CampaignColor::new).transpose()?,
        };
        let updated = self.campaign_repo.update(update).await?;

        let summary = if updated.name != current.name {
            format!("Renamed campaign '{}' → '{}'", current.name, updated.name)
        } else {
            format!("Updated campaign '{}'", updated.name)
        };
        self.audit
            .record(
                &ctx,
                AuditAction::Update,
                AuditTarget::Campaign,
                Some(updated.id.into()),
                summary,
                json!({ "name": updated.name.as_str(), "color": updated.color.as_str() }),
            )
            .await?;
        Ok(updated.into())
    }

    /// Links of the campaign are kept and lose their campaign.
    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        campaign_id: i64,
    ) -> ApplicationResult<()> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let campaign = load_accessible_campaign(self.campaign_repo.as_ref(), &ctx, campaign_id).await?;

        self.link_repo.detach_campaign(campaign.id).await?;
        self.campaign_repo.delete(campaign.id).await?;

        self.audit
            .record(
                &ctx,
                AuditAction::Delete,
                AuditTarget::Campaign,
                Some(campaign.id.into()),
                format!("Deleted campaign '{}'", campaign.name),
                json!({ "name": campaign.name.as_str() }),
            )
            .await?;
        tracing::info!(campaign_id = i64::from(campaign.id), "campaign deleted");
        Ok(())
    }
}
