// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewUser, User, UserProfile, UserUpdate};
pub use repository::{Registration, UserRepository};
pub use value_objects::{AccessRequestStatus, Email, PasswordHash, UserId, Username};
