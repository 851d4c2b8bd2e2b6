// src/domain/campaign/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Campaign, CampaignUpdate, NewCampaign};
pub use repository::CampaignRepository;
pub use value_objects::{CampaignColor, CampaignId, CampaignName};
