// server/src/services/mod.rs

pub mod auth_service;
pub mod seed_service;
pub mod session_service;
