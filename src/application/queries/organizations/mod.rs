mod members;
mod service;

pub use service::OrganizationQueryService;
