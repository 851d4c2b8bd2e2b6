mod bulk;
mod create;
mod delete;
mod import;
mod input;
mod service;
mod update;
mod visit;

pub use bulk::BulkUpdateLinksCommand;
pub use import::ImportLinksCommand;
pub use input::LinkInput;
pub use service::LinkCommandService;
pub use visit::{RedirectDecision, VerifyLinkCommand, VisitorInfo};
