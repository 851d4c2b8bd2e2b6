// tests/support/mocks/util.rs
use async_trait::async_trait;
use linkforge::application::ApplicationResult;
use linkforge::application::ports::geo::GeoLocator;
use linkforge::application::ports::util::{SecretGenerator, ShortCodeGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};

/// `gen0001`, `gen0002`, ...
#[derive(Default)]
pub struct SequentialShortCodes(AtomicUsize);

impl ShortCodeGenerator for SequentialShortCodes {
    fn generate(&self) -> String {
        format!("gen{:04}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[derive(Default)]
pub struct SequentialSecrets(AtomicUsize);

impl SecretGenerator for SequentialSecrets {
    fn generate(&self) -> String {
        format!("secret-{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// 常に同じ国コードを返す GeoIP スタブ
#[derive(Clone)]
pub struct StubGeoLocator(pub Option<&'static str>);

#[async_trait]
impl GeoLocator for StubGeoLocator {
    async fn country_code(&self, _ip: &str) -> ApplicationResult<Option<String>> {
        Ok(self.0.map(String::from))
    }
}
