mod requests;
mod service;

pub use service::UserQueryService;
