// src/lib.rs
//! Multi-tenant link shortener: organizations, campaigns, short links,
//! click analytics and an audit trail behind an Axum HTTP API.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
