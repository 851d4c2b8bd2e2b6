pub mod analytics;
pub mod audit;
pub mod campaign;
pub mod errors;
pub mod link;
pub mod organization;
pub mod user;
