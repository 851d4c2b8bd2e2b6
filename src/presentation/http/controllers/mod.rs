// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod auth;
pub mod campaigns;
pub mod export;
pub mod links;
pub mod organizations;
pub mod public;
pub mod users;

use crate::application::csv_format::parse_timestamp;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Acknowledgement body for deletions and other operations without a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { ok: true })
    }
}

/// Keeps "field absent" (`None`) apart from "field set to null" (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Like [`double_option`] for timestamps. Besides RFC 3339 it accepts the
/// `YYYY-mm-ddTHH:MM[:SS]` values HTML date inputs send (read as UTC), and
/// an empty string clears the value.
pub(crate) fn double_option_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw.map(|value| value.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(Some(None));
    };
    parse_timestamp(&raw)
        .or_else(|err| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
                .map(|naive| naive.and_utc())
                .ok_or(err)
        })
        .map(|at| Some(Some(at)))
        .map_err(serde::de::Error::custom)
}
