// server/src/db/postgres.rs

//! `InventoryStore` over a Postgres pool, using runtime-checked queries.
//!
//! Partial updates run as a single `UPDATE ... RETURNING`: `COALESCE` keeps a
//! column when the patch leaves it out, and nullable columns take a
//! `(present, value)` pair so an explicit `null` can clear them.

use async_trait::async_trait;
use inventaris_core::{
  Barang, BarangDetail, BarangPatch, InventoryStore, Kategori, KategoriPatch, NamedRef, NewBarang, NewKategori,
  NewRuangan, NewUser, Ruangan, RuanganPatch, StoreError, StoreResult, User, UserPatch,
};
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Applies the embedded schema migrations.
  pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(&self.pool).await
  }
}

/// Uniqueness and foreign-key rejections become `Constraint`; a missing row
/// from `fetch_one` becomes `NotFound`.
fn store_error(err: sqlx::Error) -> StoreError {
  if let Some(db_err) = err.as_database_error() {
    if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
      return StoreError::Constraint(db_err.message().to_string());
    }
  }
  match err {
    sqlx::Error::RowNotFound => StoreError::NotFound,
    other => {
      error!(error = %other, "Postgres query failed.");
      anyhow::Error::new(other).into()
    }
  }
}

#[derive(FromRow)]
struct BarangDetailRow {
  #[sqlx(flatten)]
  barang: Barang,
  kategori_nama: Option<String>,
  ruangan_nama: Option<String>,
}

impl From<BarangDetailRow> for BarangDetail {
  fn from(row: BarangDetailRow) -> Self {
    let kategori = row.kategori_nama.map(|nama| NamedRef {
      id: row.barang.kategori_id,
      nama,
    });
    let ruangan = row.ruangan_nama.map(|nama| NamedRef {
      id: row.barang.ruangan_id,
      nama,
    });
    BarangDetail {
      barang: row.barang,
      kategori,
      ruangan,
    }
  }
}

const BARANG_DETAIL_SELECT: &str = "SELECT b.id, b.nama, b.deskripsi, b.kategori_id, b.ruangan_id, b.jumlah, \
   b.kondisi, b.created_at, b.updated_at, k.nama AS kategori_nama, r.nama AS ruangan_nama \
   FROM barang b \
   LEFT JOIN kategori k ON k.id = b.kategori_id \
   LEFT JOIN ruangan r ON r.id = b.ruangan_id";

#[async_trait]
impl InventoryStore for PgStore {
  async fn list_users(&self) -> StoreResult<Vec<User>> {
    sqlx::query_as(
      "SELECT id, email, password_hash, name, role, avatar, created_at, updated_at FROM users ORDER BY created_at DESC",
    )
    .fetch_all(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn get_user(&self, id: Uuid) -> StoreResult<User> {
    sqlx::query_as(
      "SELECT id, email, password_hash, name, role, avatar, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
    sqlx::query_as(
      "SELECT id, email, password_hash, name, role, avatar, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&self.pool)
    .await
    .map_err(store_error)
  }

  #[instrument(name = "pg_store::create_user", skip(self, new_user), err(Display))]
  async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
    sqlx::query_as(
      "INSERT INTO users (email, password_hash, name, role, avatar) VALUES ($1, $2, $3, $4, $5) \
       RETURNING id, email, password_hash, name, role, avatar, created_at, updated_at",
    )
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.name)
    .bind(new_user.role)
    .bind(new_user.avatar)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  #[instrument(name = "pg_store::update_user", skip(self, patch), err(Display))]
  async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
    sqlx::query_as(
      "UPDATE users SET \
         email = COALESCE($2, email), \
         password_hash = COALESCE($3, password_hash), \
         name = COALESCE($4, name), \
         role = COALESCE($5, role), \
         avatar = CASE WHEN $6 THEN $7 ELSE avatar END, \
         updated_at = now() \
       WHERE id = $1 \
       RETURNING id, email, password_hash, name, role, avatar, created_at, updated_at",
    )
    .bind(id)
    .bind(patch.email)
    .bind(patch.password_hash)
    .bind(patch.name)
    .bind(patch.role)
    .bind(patch.avatar.is_some())
    .bind(patch.avatar.flatten())
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map(|_| ())
      .map_err(store_error)
  }

  async fn list_kategori(&self) -> StoreResult<Vec<Kategori>> {
    sqlx::query_as("SELECT id, nama, deskripsi, created_at, updated_at FROM kategori ORDER BY nama ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)
  }

  async fn get_kategori(&self, id: Uuid) -> StoreResult<Kategori> {
    sqlx::query_as("SELECT id, nama, deskripsi, created_at, updated_at FROM kategori WHERE id = $1")
      .bind(id)
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)
  }

  async fn create_kategori(&self, new_kategori: NewKategori) -> StoreResult<Kategori> {
    sqlx::query_as(
      "INSERT INTO kategori (nama, deskripsi) VALUES ($1, $2) \
       RETURNING id, nama, deskripsi, created_at, updated_at",
    )
    .bind(new_kategori.nama)
    .bind(new_kategori.deskripsi)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn update_kategori(&self, id: Uuid, patch: KategoriPatch) -> StoreResult<Kategori> {
    sqlx::query_as(
      "UPDATE kategori SET \
         nama = COALESCE($2, nama), \
         deskripsi = CASE WHEN $3 THEN $4 ELSE deskripsi END, \
         updated_at = now() \
       WHERE id = $1 \
       RETURNING id, nama, deskripsi, created_at, updated_at",
    )
    .bind(id)
    .bind(patch.nama)
    .bind(patch.deskripsi.is_some())
    .bind(patch.deskripsi.flatten())
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn delete_kategori(&self, id: Uuid) -> StoreResult<()> {
    sqlx::query("DELETE FROM kategori WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map(|_| ())
      .map_err(store_error)
  }

  async fn list_ruangan(&self) -> StoreResult<Vec<Ruangan>> {
    sqlx::query_as("SELECT id, nama, lokasi, deskripsi, created_at, updated_at FROM ruangan ORDER BY nama ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)
  }

  async fn get_ruangan(&self, id: Uuid) -> StoreResult<Ruangan> {
    sqlx::query_as("SELECT id, nama, lokasi, deskripsi, created_at, updated_at FROM ruangan WHERE id = $1")
      .bind(id)
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)
  }

  async fn create_ruangan(&self, new_ruangan: NewRuangan) -> StoreResult<Ruangan> {
    sqlx::query_as(
      "INSERT INTO ruangan (nama, lokasi, deskripsi) VALUES ($1, $2, $3) \
       RETURNING id, nama, lokasi, deskripsi, created_at, updated_at",
    )
    .bind(new_ruangan.nama)
    .bind(new_ruangan.lokasi)
    .bind(new_ruangan.deskripsi)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn update_ruangan(&self, id: Uuid, patch: RuanganPatch) -> StoreResult<Ruangan> {
    sqlx::query_as(
      "UPDATE ruangan SET \
         nama = COALESCE($2, nama), \
         lokasi = CASE WHEN $3 THEN $4 ELSE lokasi END, \
         deskripsi = CASE WHEN $5 THEN $6 ELSE deskripsi END, \
         updated_at = now() \
       WHERE id = $1 \
       RETURNING id, nama, lokasi, deskripsi, created_at, updated_at",
    )
    .bind(id)
    .bind(patch.nama)
    .bind(patch.lokasi.is_some())
    .bind(patch.lokasi.flatten())
    .bind(patch.deskripsi.is_some())
    .bind(patch.deskripsi.flatten())
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn delete_ruangan(&self, id: Uuid) -> StoreResult<()> {
    sqlx::query("DELETE FROM ruangan WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map(|_| ())
      .map_err(store_error)
  }

  async fn list_barang(&self) -> StoreResult<Vec<BarangDetail>> {
    let rows: Vec<BarangDetailRow> = sqlx::query_as(&format!("{} ORDER BY b.created_at DESC", BARANG_DETAIL_SELECT))
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(BarangDetail::from).collect())
  }

  async fn get_barang(&self, id: Uuid) -> StoreResult<BarangDetail> {
    let row: BarangDetailRow = sqlx::query_as(&format!("{} WHERE b.id = $1", BARANG_DETAIL_SELECT))
      .bind(id)
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.into())
  }

  #[instrument(name = "pg_store::create_barang", skip(self, new_barang), err(Display))]
  async fn create_barang(&self, new_barang: NewBarang) -> StoreResult<Barang> {
    sqlx::query_as(
      "INSERT INTO barang (nama, deskripsi, kategori_id, ruangan_id, jumlah, kondisi) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       RETURNING id, nama, deskripsi, kategori_id, ruangan_id, jumlah, kondisi, created_at, updated_at",
    )
    .bind(new_barang.nama)
    .bind(new_barang.deskripsi)
    .bind(new_barang.kategori_id)
    .bind(new_barang.ruangan_id)
    .bind(new_barang.jumlah)
    .bind(new_barang.kondisi)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn update_barang(&self, id: Uuid, patch: BarangPatch) -> StoreResult<Barang> {
    sqlx::query_as(
      "UPDATE barang SET \
         nama = COALESCE($2, nama), \
         deskripsi = CASE WHEN $3 THEN $4 ELSE deskripsi END, \
         kategori_id = COALESCE($5, kategori_id), \
         ruangan_id = COALESCE($6, ruangan_id), \
         jumlah = COALESCE($7, jumlah), \
         kondisi = COALESCE($8, kondisi), \
         updated_at = now() \
       WHERE id = $1 \
       RETURNING id, nama, deskripsi, kategori_id, ruangan_id, jumlah, kondisi, created_at, updated_at",
    )
    .bind(id)
    .bind(patch.nama)
    .bind(patch.deskripsi.is_some())
    .bind(patch.deskripsi.flatten())
    .bind(patch.kategori_id)
    .bind(patch.ruangan_id)
    .bind(patch.jumlah)
    .bind(patch.kondisi)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)
  }

  async fn delete_barang(&self, id: Uuid) -> StoreResult<()> {
    sqlx::query("DELETE FROM barang WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map(|_| ())
      .map_err(store_error)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_row_is_not_found() {
    assert!(matches!(store_error(sqlx::Error::RowNotFound), StoreError::NotFound));
  }

  #[test]
  fn other_failures_keep_their_source() {
    let err = store_error(sqlx::Error::PoolTimedOut);
    match err {
      StoreError::Backend { source } => assert!(source.downcast_ref::<sqlx::Error>().is_some()),
      other => panic!("expected a backend error, got {:?}", other),
    }
  }
}
