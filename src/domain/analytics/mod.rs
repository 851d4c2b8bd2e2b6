// src/domain/analytics/mod.rs
pub mod entity;
pub mod repository;
pub mod user_agent;

pub use entity::{ClickEvent, CountBucket, DailyCount, DeviceType, NewClickEvent};
pub use repository::ClickEventRepository;
pub use user_agent::{UserAgentInfo, classify_user_agent};
