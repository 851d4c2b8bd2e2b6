mod export;
mod list;
mod service;
mod stats;

pub use list::ListLinksQuery;
pub use service::LinkQueryService;
