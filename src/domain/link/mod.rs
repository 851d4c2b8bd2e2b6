// src/domain/link/mod.rs
pub mod access;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use access::{AccessAttempt, AccessDenial, Protection};
pub use entity::{Link, LinkChanges, LinkFilter, LinkScope, NewLink, UtmChanges};
pub use repository::{LinkReadRepository, LinkWriteRepository};
pub use value_objects::{
    AllowedEmails, DestinationUrl, LinkId, RedirectType, ShortCode, Tags, UtmParams,
};
