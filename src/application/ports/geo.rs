// src/application/ports/geo.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// ISO country code for `ip`, `None` when the lookup has no answer.
    async fn country_code(&self, ip: &str) -> ApplicationResult<Option<String>>;
}
