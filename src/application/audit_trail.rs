// src/application/audit_trail.rs
use crate::application::{context::RequestContext, error::ApplicationResult, ports::time::Clock};
use crate::domain::audit::{AuditAction, AuditLogRepository, AuditTarget, NewAuditLog};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Writes audit entries scoped to the caller's organization.
#[derive(Clone)]
pub struct AuditTrail {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditTrail {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Every entry carries a `summary`; `extra` adds fields next to it.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: AuditAction,
        target: AuditTarget,
        target_id: Option<i64>,
        summary: impl Into<String>,
        extra: Value,
    ) -> ApplicationResult<()> {
        let mut details = match extra {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".into(), other);
                map
            }
        };
        details.insert("summary".into(), json!(summary.into()));

        self.repo
            .insert(NewAuditLog {
                user_id: ctx.user_id(),
                org_id: ctx.org_id(),
                action,
                target_type: target,
                target_id,
                details: Value::Object(details),
                timestamp: self.clock.now(),
            })
            .await?;

        tracing::debug!(
            org_id = %ctx.org_id(),
            user_id = %ctx.user_id(),
            action = action.as_str(),
            target = target.as_str(),
            "audit entry recorded"
        );
        Ok(())
    }
}
