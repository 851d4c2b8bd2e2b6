// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_campaign;
mod postgres_click;
mod postgres_link;
mod postgres_organization;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_campaign::PostgresCampaignRepository;
pub use postgres_click::PostgresClickEventRepository;
pub use postgres_link::PostgresLinkRepository;
pub use postgres_organization::{
    PostgresInviteRepository, PostgresMembershipRepository, PostgresOrganizationRepository,
};
pub use postgres_user::PostgresUserRepository;
