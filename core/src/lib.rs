// src/lib.rs

//! Inventaris core: the records and the storage contract behind the
//! inventory admin panel.
//!
//! The crate knows nothing about HTTP. It provides:
//!  - Flat records for users, categories (`Kategori`), rooms (`Ruangan`) and
//!    items (`Barang`), plus their create payloads and partial patches.
//!  - The `InventoryStore` trait, the single data-access handle the server
//!    receives at start-up.
//!  - `MemoryStore`, an in-process implementation that enforces the same
//!    constraints as the Postgres schema.

pub mod error;
pub mod models;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{StoreError, StoreResult};

pub use crate::models::{
  Barang, BarangDetail, BarangPatch, Kategori, KategoriPatch, NamedRef, NewBarang, NewKategori, NewRuangan, NewUser,
  Ruangan, RuanganPatch, User, UserPatch, DEFAULT_JUMLAH, DEFAULT_KONDISI,
};

pub use crate::store::memory::MemoryStore;
pub use crate::store::InventoryStore;
