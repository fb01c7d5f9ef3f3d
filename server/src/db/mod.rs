// server/src/db/mod.rs

pub mod postgres;

pub use postgres::PgStore;
