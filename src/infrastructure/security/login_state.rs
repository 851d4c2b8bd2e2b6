// src/infrastructure/security/login_state.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::identity::LoginStateStore,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local store; a sign-in must start and finish on the same instance.
#[derive(Default)]
pub struct InMemoryLoginStateStore {
    // state -> expiry
    inner: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryLoginStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> ApplicationResult<MutexGuard<'_, HashMap<String, DateTime<Utc>>>> {
        self.inner
            .lock()
            .map_err(|_| ApplicationError::infrastructure("login state store poisoned"))
    }
}

#[async_trait]
impl LoginStateStore for InMemoryLoginStateStore {
    async fn save(&self, state: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()> {
        self.guard()?.insert(state.to_string(), expires_at);
        Ok(())
    }

    async fn consume(&self, state: &str, now: DateTime<Utc>) -> ApplicationResult<bool> {
        let mut states = self.guard()?;
        let valid = states.remove(state).is_some_and(|expiry| expiry > now);
        // abandoned sign-ins
        states.retain(|_, expiry| *expiry > now);
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn states_are_single_use() {
        let store = InMemoryLoginStateStore::new();
        let now = Utc::now();
        store.save("abc", now + Duration::minutes(10)).await.unwrap();

        assert!(store.consume("abc", now).await.unwrap());
        assert!(!store.consume("abc", now).await.unwrap());
        assert!(!store.consume("never-issued", now).await.unwrap());
    }

    #[tokio::test]
    async fn expired_states_are_rejected_and_pruned() {
        let store = InMemoryLoginStateStore::new();
        let now = Utc::now();
        store.save("late", now + Duration::minutes(10)).await.unwrap();
        store.save("stale", now + Duration::minutes(5)).await.unwrap();

        assert!(!store.consume("late", now + Duration::minutes(11)).await.unwrap());
        assert!(store.guard().unwrap().is_empty());
    }
}
