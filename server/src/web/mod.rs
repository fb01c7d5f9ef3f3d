// server/src/web/mod.rs

pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod pages;
pub mod routes;

pub use routes::configure_app_routes;
