// src/domain/audit/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{AuditAction, AuditFilter, AuditLog, AuditTarget, NewAuditLog};
pub use repository::AuditLogRepository;
