mod service;
mod write;

pub(crate) use service::load_accessible_campaign;
pub use service::CampaignCommandService;
pub use write::{CreateCampaignCommand, UpdateCampaignCommand};
