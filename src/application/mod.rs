pub mod analytics;
pub mod audit_trail;
pub mod commands;
pub mod context;
pub mod csv_format;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

pub use context::{ContextResolver, RequestContext};
pub use error::ApplicationResult;
