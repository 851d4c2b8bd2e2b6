// src/infrastructure/geo.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::geo::GeoLocator,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Looks up countries with an ip-api.com compatible JSON endpoint.
#[derive(Clone)]
pub struct HttpGeoLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGeoLocator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, ip: &str) -> String {
        format!("{}/{ip}?fields=status,countryCode", self.endpoint)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    status: Option<String>,
    country_code: Option<String>,
}

impl LookupResponse {
    fn into_country(self) -> Option<String> {
        match self.status.as_deref() {
            Some("success") => self.country_code.filter(|code| !code.is_empty()),
            _ => None,
        }
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn country_code(&self, ip: &str) -> ApplicationResult<Option<String>> {
        let response = self
            .client
            .get(self.lookup_url(ip))
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("geoip request: {err}")))?;
        let body: LookupResponse = response
            .json()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("geoip response: {err}")))?;
        Ok(body.into_country())
    }
}

/// Used when GeoIP lookups are disabled.
#[derive(Default, Clone)]
pub struct DisabledGeoLocator;

#[async_trait]
impl GeoLocator for DisabledGeoLocator {
    async fn country_code(&self, _ip: &str) -> ApplicationResult<Option<String>> {
        Ok(None)
    }
}
