mod service;

pub use service::CampaignQueryService;
