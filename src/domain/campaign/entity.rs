// src/domain/campaign/entity.rs
use super::value_objects::{CampaignColor, CampaignId, CampaignName};
use crate::domain::{organization::OrganizationId, user::UserId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: CampaignName,
    pub color: CampaignColor,
    pub owner_id: UserId,
    pub org_id: OrganizationId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: CampaignName,
    pub color: CampaignColor,
    pub owner_id: UserId,
    pub org_id: OrganizationId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CampaignUpdate {
    pub id: CampaignId,
    pub name: Option<CampaignName>,
    pub color: Option<CampaignColor>,
}
