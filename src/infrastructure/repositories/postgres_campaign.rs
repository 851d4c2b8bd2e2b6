// src/infrastructure/repositories/postgres_campaign.rs
use super::map_sqlx;
use crate::domain::campaign::{
    Campaign, CampaignColor, CampaignId, CampaignName, CampaignRepository, CampaignUpdate,
    NewCampaign,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::organization::OrganizationId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const CAMPAIGN_COLUMNS: &str = "id, name, color, owner_id, org_id, created_at";

#[derive(Clone)]
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CampaignRow {
    id: i64,
    name: String,
    color: String,
    owner_id: i64,
    org_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = DomainError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        Ok(Campaign {
            id: CampaignId::new(row.id)?,
            name: CampaignName::new(row.name)?,
            // Rows written before color validation fall back to the default swatch.
            color: CampaignColor::new(row.color).unwrap_or_default(),
            owner_id: UserId::new(row.owner_id)?,
            org_id: OrganizationId::new(row.org_id)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn insert(&self, campaign: NewCampaign) -> DomainResult<Campaign> {
        let sql = format!(
            "INSERT INTO campaigns (name, color, owner_id, org_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(campaign.name.as_str())
            .bind(campaign.color.as_str())
            .bind(i64::from(campaign.owner_id))
            .bind(i64::from(campaign.org_id))
            .bind(campaign.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Campaign::try_from(row)
    }

    async fn find_by_id(&self, id: CampaignId) -> DomainResult<Option<Campaign>> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1");
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Campaign::try_from).transpose()
    }

    async fn list(
        &self,
        org_id: OrganizationId,
        owner_id: Option<UserId>,
    ) -> DomainResult<Vec<Campaign>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE org_id = "));
        builder.push_bind(i64::from(org_id));
        if let Some(owner_id) = owner_id {
            builder.push(" AND owner_id = ").push_bind(i64::from(owner_id));
        }
        builder.push(" ORDER BY name, id");

        let rows = builder
            .build_query_as::<CampaignRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Campaign::try_from).collect()
    }

    async fn update(&self, update: CampaignUpdate) -> DomainResult<Campaign> {
        let CampaignUpdate { id, name, color } = update;
        if name.is_none() && color.is_none() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::NotFound("Campaign not found".into()));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE campaigns SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = name {
            fields.push("name = ").push_bind_unseparated(String::from(name));
        }
        if let Some(color) = color {
            fields.push("color = ").push_bind_unseparated(String::from(color));
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {CAMPAIGN_COLUMNS}"));

        let row = builder
            .build_query_as::<CampaignRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("Campaign not found".into()))?;
        Campaign::try_from(row)
    }

    async fn delete(&self, id: CampaignId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Campaign not found".into()));
        }
        Ok(())
    }
}
