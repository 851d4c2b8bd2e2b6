// src/presentation/http/state.rs
use super::middleware::rate_limit::RateLimit;
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: Arc<HttpSettings>,
}

/// Values the HTTP layer needs from configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub project_name: String,
    /// Base URL of the single-page app, without a trailing slash.
    pub frontend_url: String,
    pub allowed_origins: Vec<String>,
    /// Applied to login and the public redirect/verify routes; `None` disables it.
    pub rate_limit: Option<RateLimit>,
}

impl HttpSettings {
    pub fn frontend(&self, path: &str) -> String {
        format!("{}{path}", self.frontend_url.trim_end_matches('/'))
    }
}
