// src/domain/organization/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{
    Invite, Membership, NewInvite, NewOrganization, Organization, OrganizationStats,
    OrganizationUpdate,
};
pub use repository::{InviteRepository, MembershipRepository, OrganizationRepository};
pub use value_objects::{
    InviteId, InviteStatus, MemberRole, OrganizationId, OrganizationName, OrganizationSlug, Plan,
};
