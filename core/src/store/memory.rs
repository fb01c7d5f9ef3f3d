// core/src/store/memory.rs

//! An `InventoryStore` kept in process memory.
//!
//! Used for local runs without Postgres and by the test suites. It enforces
//! the rules the SQL schema declares (unique e-mail, item references that must
//! resolve, categories and rooms that cannot be deleted while items point at
//! them) so callers observe the same failures from either backend.
//!
//! IMPORTANT: the table lock is a blocking `parking_lot::RwLock`. Every method
//! takes and drops it without crossing an `.await`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{
  Barang, BarangDetail, BarangPatch, Kategori, KategoriPatch, NamedRef, NewBarang, NewKategori, NewRuangan, NewUser,
  Ruangan, RuanganPatch, User, UserPatch,
};
use crate::store::InventoryStore;

#[derive(Debug, Default)]
struct Tables {
  users: Vec<User>,
  kategori: Vec<Kategori>,
  ruangan: Vec<Ruangan>,
  barang: Vec<Barang>,
}

impl Tables {
  fn check_email_free(&self, email: &str, except: Option<Uuid>) -> StoreResult<()> {
    let taken = self
      .users
      .iter()
      .any(|u| u.email == email && Some(u.id) != except);
    if taken {
      return Err(StoreError::Constraint(format!("e-mail '{}' is already registered", email)));
    }
    Ok(())
  }

  fn check_item_refs(&self, kategori_id: Uuid, ruangan_id: Uuid) -> StoreResult<()> {
    if !self.kategori.iter().any(|k| k.id == kategori_id) {
      return Err(StoreError::Constraint(format!("kategori {} does not exist", kategori_id)));
    }
    if !self.ruangan.iter().any(|r| r.id == ruangan_id) {
      return Err(StoreError::Constraint(format!("ruangan {} does not exist", ruangan_id)));
    }
    Ok(())
  }

  fn detail(&self, barang: &Barang) -> BarangDetail {
    let kategori = self
      .kategori
      .iter()
      .find(|k| k.id == barang.kategori_id)
      .map(|k| NamedRef {
        id: k.id,
        nama: k.nama.clone(),
      });
    let ruangan = self
      .ruangan
      .iter()
      .find(|r| r.id == barang.ruangan_id)
      .map(|r| NamedRef {
        id: r.id,
        nama: r.nama.clone(),
      });

    BarangDetail {
      barang: barang.clone(),
      kategori,
      ruangan,
    }
  }
}

/// Rows come back newest first; rows created within the same instant keep
/// reverse insertion order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
  let mut out: Vec<T> = rows.iter().rev().cloned().collect();
  out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
  out
}

/// Cloning shares the underlying tables.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InventoryStore for MemoryStore {
  async fn list_users(&self) -> StoreResult<Vec<User>> {
    let tables = self.tables.read();
    Ok(newest_first(&tables.users, |u| u.created_at))
  }

  async fn get_user(&self, id: Uuid) -> StoreResult<User> {
    let tables = self.tables.read();
    tables
      .users
      .iter()
      .find(|u| u.id == id)
      .cloned()
      .ok_or(StoreError::NotFound)
  }

  async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
    let tables = self.tables.read();
    Ok(tables.users.iter().find(|u| u.email == email).cloned())
  }

  #[instrument(name = "memory_store::create_user", skip(self, new_user), err(Display))]
  async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
    let mut tables = self.tables.write();
    tables.check_email_free(&new_user.email, None)?;

    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      email: new_user.email,
      password_hash: new_user.password_hash,
      name: new_user.name,
      role: new_user.role,
      avatar: new_user.avatar,
      created_at: now,
      updated_at: now,
    };
    tables.users.push(user.clone());
    debug!(user_id = %user.id, "User inserted.");
    Ok(user)
  }

  async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
    let mut tables = self.tables.write();
    if let Some(email) = patch.email.as_deref() {
      tables.check_email_free(email, Some(id))?;
    }

    let user = tables
      .users
      .iter_mut()
      .find(|u| u.id == id)
      .ok_or(StoreError::NotFound)?;
    patch.apply_to(user);
    user.updated_at = Utc::now();
    Ok(user.clone())
  }

  async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
    self.tables.write().users.retain(|u| u.id != id);
    Ok(())
  }

  async fn list_kategori(&self) -> StoreResult<Vec<Kategori>> {
    let mut rows = self.tables.read().kategori.clone();
    rows.sort_by(|a, b| a.nama.cmp(&b.nama));
    Ok(rows)
  }

  async fn get_kategori(&self, id: Uuid) -> StoreResult<Kategori> {
    let tables = self.tables.read();
    tables
      .kategori
      .iter()
      .find(|k| k.id == id)
      .cloned()
      .ok_or(StoreError::NotFound)
  }

  async fn create_kategori(&self, new_kategori: NewKategori) -> StoreResult<Kategori> {
    let now = Utc::now();
    let kategori = Kategori {
      id: Uuid::new_v4(),
      nama: new_kategori.nama,
      deskripsi: new_kategori.deskripsi,
      created_at: now,
      updated_at: now,
    };
    self.tables.write().kategori.push(kategori.clone());
    Ok(kategori)
  }

  async fn update_kategori(&self, id: Uuid, patch: KategoriPatch) -> StoreResult<Kategori> {
    let mut tables = self.tables.write();
    let kategori = tables
      .kategori
      .iter_mut()
      .find(|k| k.id == id)
      .ok_or(StoreError::NotFound)?;
    patch.apply_to(kategori);
    kategori.updated_at = Utc::now();
    Ok(kategori.clone())
  }

  #[instrument(name = "memory_store::delete_kategori", skip(self), err(Display))]
  async fn delete_kategori(&self, id: Uuid) -> StoreResult<()> {
    let mut tables = self.tables.write();
    if tables.barang.iter().any(|b| b.kategori_id == id) {
      return Err(StoreError::Constraint(format!("kategori {} is still referenced by barang", id)));
    }
    tables.kategori.retain(|k| k.id != id);
    Ok(())
  }

  async fn list_ruangan(&self) -> StoreResult<Vec<Ruangan>> {
    let mut rows = self.tables.read().ruangan.clone();
    rows.sort_by(|a, b| a.nama.cmp(&b.nama));
    Ok(rows)
  }

  async fn get_ruangan(&self, id: Uuid) -> StoreResult<Ruangan> {
    let tables = self.tables.read();
    tables
      .ruangan
      .iter()
      .find(|r| r.id == id)
      .cloned()
      .ok_or(StoreError::NotFound)
  }

  async fn create_ruangan(&self, new_ruangan: NewRuangan) -> StoreResult<Ruangan> {
    let now = Utc::now();
    let ruangan = Ruangan {
      id: Uuid::new_v4(),
      nama: new_ruangan.nama,
      lokasi: new_ruangan.lokasi,
      deskripsi: new_ruangan.deskripsi,
      created_at: now,
      updated_at: now,
    };
    self.tables.write().ruangan.push(ruangan.clone());
    Ok(ruangan)
  }

  async fn update_ruangan(&self, id: Uuid, patch: RuanganPatch) -> StoreResult<Ruangan> {
    let mut tables = self.tables.write();
    let ruangan = tables
      .ruangan
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or(StoreError::NotFound)?;
    patch.apply_to(ruangan);
    ruangan.updated_at = Utc::now();
    Ok(ruangan.clone())
  }

  #[instrument(name = "memory_store::delete_ruangan", skip(self), err(Display))]
  async fn delete_ruangan(&self, id: Uuid) -> StoreResult<()> {
    let mut tables = self.tables.write();
    if tables.barang.iter().any(|b| b.ruangan_id == id) {
      return Err(StoreError::Constraint(format!("ruangan {} is still referenced by barang", id)));
    }
    tables.ruangan.retain(|r| r.id != id);
    Ok(())
  }

  async fn list_barang(&self) -> StoreResult<Vec<BarangDetail>> {
    let tables = self.tables.read();
    Ok(
      newest_first(&tables.barang, |b| b.created_at)
        .iter()
        .map(|b| tables.detail(b))
        .collect(),
    )
  }

  async fn get_barang(&self, id: Uuid) -> StoreResult<BarangDetail> {
    let tables = self.tables.read();
    tables
      .barang
      .iter()
      .find(|b| b.id == id)
      .map(|b| tables.detail(b))
      .ok_or(StoreError::NotFound)
  }

  #[instrument(name = "memory_store::create_barang", skip(self, new_barang), err(Display))]
  async fn create_barang(&self, new_barang: NewBarang) -> StoreResult<Barang> {
    let mut tables = self.tables.write();
    tables.check_item_refs(new_barang.kategori_id, new_barang.ruangan_id)?;

    let now = Utc::now();
    let barang = Barang {
      id: Uuid::new_v4(),
      nama: new_barang.nama,
      deskripsi: new_barang.deskripsi,
      kategori_id: new_barang.kategori_id,
      ruangan_id: new_barang.ruangan_id,
      jumlah: new_barang.jumlah,
      kondisi: new_barang.kondisi,
      created_at: now,
      updated_at: now,
    };
    tables.barang.push(barang.clone());
    Ok(barang)
  }

  async fn update_barang(&self, id: Uuid, patch: BarangPatch) -> StoreResult<Barang> {
    let mut tables = self.tables.write();
    let current = tables
      .barang
      .iter()
      .find(|b| b.id == id)
      .ok_or(StoreError::NotFound)?;
    let kategori_id = patch.kategori_id.unwrap_or(current.kategori_id);
    let ruangan_id = patch.ruangan_id.unwrap_or(current.ruangan_id);
    tables.check_item_refs(kategori_id, ruangan_id)?;

    let barang = tables
      .barang
      .iter_mut()
      .find(|b| b.id == id)
      .ok_or(StoreError::NotFound)?;
    patch.apply_to(barang);
    barang.updated_at = Utc::now();
    Ok(barang.clone())
  }

  async fn delete_barang(&self, id: Uuid) -> StoreResult<()> {
    self.tables.write().barang.retain(|b| b.id != id);
    Ok(())
  }
}
