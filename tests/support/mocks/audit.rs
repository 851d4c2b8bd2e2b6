// tests/support/mocks/audit.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use linkforge::domain::audit::{AuditFilter, AuditLog, AuditLogRepository, NewAuditLog};
use linkforge::domain::errors::DomainResult;
use linkforge::domain::organization::OrganizationId;

#[derive(Clone)]
pub struct MemoryAuditRepo(pub MemoryStore);

#[async_trait]
impl AuditLogRepository for MemoryAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let id = tables.next_id("audit_logs");
        tables.audit_logs.push(AuditLog {
            id,
            user_id: Some(log.user_id),
            org_id: Some(log.org_id),
            action: log.action.as_str().to_string(),
            target_type: log.target_type.as_str().to_string(),
            target_id: log.target_id,
            details: Some(log.details),
            timestamp: log.timestamp,
        });
        Ok(())
    }

    async fn list(
        &self,
        org_id: OrganizationId,
        filter: &AuditFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut logs: Vec<_> = self
            .0
            .lock()
            .audit_logs
            .iter()
            .filter(|l| l.org_id == Some(org_id) && filter.matches(l))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(logs
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }
}

/// 監査ログの summary をすべて取り出す
pub fn audit_summaries(store: &MemoryStore) -> Vec<String> {
    store
        .lock()
        .audit_logs
        .iter()
        .filter_map(|l| l.details.as_ref()?.get("summary")?.as_str().map(String::from))
        .collect()
}
