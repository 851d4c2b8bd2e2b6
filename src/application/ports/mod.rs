// src/application/ports/mod.rs
pub mod geo;
pub mod identity;
pub mod security;
pub mod time;
pub mod util;
