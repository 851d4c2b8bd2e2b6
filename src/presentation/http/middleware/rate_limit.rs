// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::{Router, body::Body};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Token bucket applied per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Tokens replenished each second.
    pub per_second: u64,
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst: 20,
        }
    }
}

pub fn rate_limit_layer(
    limit: RateLimit,
) -> Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> {
    if limit.per_second == 0 || limit.burst == 0 {
        return None;
    }

    let mut builder = GovernorConfigBuilder::default();
    builder.per_millisecond((1000 / limit.per_second).max(1));
    builder.burst_size(limit.burst);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}

/// Wraps `router` in a limiter when one is configured.
pub fn limited(router: Router, limit: Option<RateLimit>) -> Router {
    match limit.and_then(rate_limit_layer) {
        Some(layer) => router.layer(layer),
        None => router,
    }
}
