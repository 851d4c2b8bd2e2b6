// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now" for link expiry, invite expiry, click timestamps and
/// export filenames.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
