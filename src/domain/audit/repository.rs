// src/domain/audit/repository.rs
use crate::domain::audit::entity::{AuditFilter, AuditLog, NewAuditLog};
use crate::domain::errors::DomainResult;
use crate::domain::organization::OrganizationId;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()>;

    /// Newest first.
    async fn list(
        &self,
        org_id: OrganizationId,
        filter: &AuditFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>>;
}
