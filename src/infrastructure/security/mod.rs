// src/infrastructure/security/mod.rs
pub mod claims;
pub mod login_state;
pub mod password;
pub mod token;
