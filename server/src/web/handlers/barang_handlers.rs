// server/src/web/handlers/barang_handlers.rs

use actix_web::{web, HttpResponse};
use inventaris_core::{BarangPatch, NewBarang};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::handlers::filled;

const REQUIRED_FIELDS: &str = "Nama, kategori, dan ruangan harus diisi";
const NOT_FOUND: &str = "Barang tidak ditemukan";

#[derive(Deserialize, Debug)]
pub struct CreateBarangPayload {
  pub nama: Option<String>,
  pub deskripsi: Option<String>,
  #[serde(default, deserialize_with = "inventaris_core::models::blank_as_none")]
  pub kategori_id: Option<Uuid>,
  #[serde(default, deserialize_with = "inventaris_core::models::blank_as_none")]
  pub ruangan_id: Option<Uuid>,
  pub jumlah: Option<i32>,
  pub kondisi: Option<String>,
}

impl CreateBarangPayload {
  /// Applies the required-field check and the `jumlah`/`kondisi` defaults.
  fn into_new_barang(self) -> Result<NewBarang, AppError> {
    match (filled(&self.nama), self.nama, self.kategori_id, self.ruangan_id) {
      (true, Some(nama), Some(kategori_id), Some(ruangan_id)) => Ok(NewBarang::new(
        nama,
        self.deskripsi,
        kategori_id,
        ruangan_id,
        self.jumlah,
        self.kondisi,
      )),
      _ => Err(AppError::Validation(REQUIRED_FIELDS.to_string())),
    }
  }
}

#[instrument(name = "handler::list_barang", skip(auth_user, app_state), fields(user_id = %auth_user.user.id))]
pub async fn list_barang_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let barang = app_state
    .store
    .list_barang()
    .await
    .map_err(AppError::store("Gagal mengambil data barang"))?;

  info!("Fetched {} barang.", barang.len());
  Ok(HttpResponse::Ok().json(json!({ "data": barang })))
}

#[instrument(
  name = "handler::get_barang",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, barang_id = %path.as_ref())
)]
pub async fn get_barang_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let barang = app_state
    .store
    .get_barang(path.into_inner())
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengambil data barang"))?;

  Ok(HttpResponse::Ok().json(json!({ "data": barang })))
}

#[instrument(
  name = "handler::create_barang",
  skip(auth_user, app_state, req_payload),
  fields(user_id = %auth_user.user.id)
)]
pub async fn create_barang_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateBarangPayload>,
) -> Result<HttpResponse, AppError> {
  let new_barang = req_payload.into_inner().into_new_barang()?;

  let barang = app_state
    .store
    .create_barang(new_barang)
    .await
    .map_err(AppError::store("Gagal menambah barang"))?;

  info!(barang_id = %barang.id, "Barang created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Barang berhasil ditambahkan",
      "data": barang
  })))
}

#[instrument(
  name = "handler::update_barang",
  skip(auth_user, app_state, path, req_payload),
  fields(user_id = %auth_user.user.id, barang_id = %path.as_ref())
)]
pub async fn update_barang_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<BarangPatch>,
) -> Result<HttpResponse, AppError> {
  let patch = req_payload.into_inner();
  if patch.blanks_required() {
    return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
  }

  let barang = app_state
    .store
    .update_barang(path.into_inner(), patch)
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengupdate barang"))?;

  info!("Barang updated.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Barang berhasil diupdate",
      "data": barang
  })))
}

#[instrument(
  name = "handler::delete_barang",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, barang_id = %path.as_ref())
)]
pub async fn delete_barang_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .store
    .delete_barang(path.into_inner())
    .await
    .map_err(AppError::store("Gagal menghapus barang"))?;

  info!("Barang deleted.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Barang berhasil dihapus" })))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_payload_needs_name_and_both_references() {
    let kategori_id = Uuid::new_v4();
    let ruangan_id = Uuid::new_v4();

    let missing_room: CreateBarangPayload =
      serde_json::from_value(json!({ "nama": "Laptop", "kategori_id": kategori_id, "ruangan_id": "" })).unwrap();
    assert!(matches!(missing_room.into_new_barang(), Err(AppError::Validation(_))));

    let empty_name: CreateBarangPayload =
      serde_json::from_value(json!({ "nama": "", "kategori_id": kategori_id, "ruangan_id": ruangan_id })).unwrap();
    assert!(matches!(empty_name.into_new_barang(), Err(AppError::Validation(_))));

    let complete: CreateBarangPayload = serde_json::from_value(
      json!({ "nama": "Laptop", "kategori_id": kategori_id, "ruangan_id": ruangan_id, "jumlah": 0 }),
    )
    .unwrap();
    let new_barang = complete.into_new_barang().unwrap();
    assert_eq!(new_barang.jumlah, 1);
    assert_eq!(new_barang.kondisi, "baik");
  }
}
