// tests/support/mocks/store.rs
use linkforge::domain::{
    analytics::ClickEvent,
    audit::AuditLog,
    campaign::Campaign,
    link::Link,
    organization::{Invite, Membership, Organization},
    user::User,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// インメモリの全テーブル
#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub organizations: Vec<Organization>,
    pub memberships: Vec<Membership>,
    pub invites: Vec<Invite>,
    pub links: Vec<Link>,
    pub campaigns: Vec<Campaign>,
    pub clicks: Vec<ClickEvent>,
    pub audit_logs: Vec<AuditLog>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    /// テーブルごとの連番 ID を払い出す
    pub fn next_id(&mut self, table: &'static str) -> i64 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }
}

/// Shared by every in-memory repository of one test router.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }
}
