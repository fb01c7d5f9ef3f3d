// core/src/store/mod.rs

//! The data-access contract. The server builds exactly one implementation at
//! start-up and hands it to every handler through application state.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{
  Barang, BarangDetail, BarangPatch, Kategori, KategoriPatch, NewBarang, NewKategori, NewRuangan, NewUser, Ruangan,
  RuanganPatch, User, UserPatch,
};

/// One method per single-table operation.
///
/// Lookups by id return `StoreError::NotFound` on a miss. Updates refresh
/// `updated_at` and also return `NotFound` when the id does not exist.
/// Deletes succeed whether or not the row existed.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
  // --- users: newest first ---
  async fn list_users(&self) -> StoreResult<Vec<User>>;
  async fn get_user(&self, id: Uuid) -> StoreResult<User>;
  async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
  async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;
  async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User>;
  async fn delete_user(&self, id: Uuid) -> StoreResult<()>;

  // --- kategori: by name ---
  async fn list_kategori(&self) -> StoreResult<Vec<Kategori>>;
  async fn get_kategori(&self, id: Uuid) -> StoreResult<Kategori>;
  async fn create_kategori(&self, new_kategori: NewKategori) -> StoreResult<Kategori>;
  async fn update_kategori(&self, id: Uuid, patch: KategoriPatch) -> StoreResult<Kategori>;
  async fn delete_kategori(&self, id: Uuid) -> StoreResult<()>;

  // --- ruangan: by name ---
  async fn list_ruangan(&self) -> StoreResult<Vec<Ruangan>>;
  async fn get_ruangan(&self, id: Uuid) -> StoreResult<Ruangan>;
  async fn create_ruangan(&self, new_ruangan: NewRuangan) -> StoreResult<Ruangan>;
  async fn update_ruangan(&self, id: Uuid, patch: RuanganPatch) -> StoreResult<Ruangan>;
  async fn delete_ruangan(&self, id: Uuid) -> StoreResult<()>;

  // --- barang: newest first, joined with category and room names ---
  async fn list_barang(&self) -> StoreResult<Vec<BarangDetail>>;
  async fn get_barang(&self, id: Uuid) -> StoreResult<BarangDetail>;
  async fn create_barang(&self, new_barang: NewBarang) -> StoreResult<Barang>;
  async fn update_barang(&self, id: Uuid, patch: BarangPatch) -> StoreResult<Barang>;
  async fn delete_barang(&self, id: Uuid) -> StoreResult<()>;
}
