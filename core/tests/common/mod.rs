// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every fixture

use inventaris_core::{InventoryStore, Kategori, MemoryStore, NewKategori, NewRuangan, NewUser, Ruangan, User};
use tracing::Level;

// --- Fixtures ---
pub async fn seed_kategori(store: &MemoryStore, nama: &str) -> Kategori {
  store
    .create_kategori(NewKategori {
      nama: nama.to_string(),
      deskripsi: None,
    })
    .await
    .expect("kategori fixture")
}

pub async fn seed_ruangan(store: &MemoryStore, nama: &str) -> Ruangan {
  store
    .create_ruangan(NewRuangan {
      nama: nama.to_string(),
      lokasi: None,
      deskripsi: None,
    })
    .await
    .expect("ruangan fixture")
}

pub async fn seed_user(store: &MemoryStore, email: &str) -> User {
  store
    .create_user(NewUser {
      email: email.to_string(),
      password_hash: "not-a-real-hash".to_string(),
      name: "Staff".to_string(),
      role: "user".to_string(),
      avatar: None,
    })
    .await
    .expect("user fixture")
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
