// server/src/web/handlers/kategori_handlers.rs

use actix_web::{web, HttpResponse};
use inventaris_core::{KategoriPatch, NewKategori};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

const REQUIRED_FIELDS: &str = "Nama kategori harus diisi";
const NOT_FOUND: &str = "Kategori tidak ditemukan";

#[derive(Deserialize, Debug)]
pub struct CreateKategoriPayload {
  pub nama: Option<String>,
  pub deskripsi: Option<String>,
}

#[instrument(name = "handler::list_kategori", skip(auth_user, app_state), fields(user_id = %auth_user.user.id))]
pub async fn list_kategori_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let kategori = app_state
    .store
    .list_kategori()
    .await
    .map_err(AppError::store("Gagal mengambil data kategori"))?;

  info!("Fetched {} kategori.", kategori.len());
  Ok(HttpResponse::Ok().json(json!({ "data": kategori })))
}

#[instrument(name = "handler::get_kategori", skip(auth_user, app_state, path), fields(user_id = %auth_user.user.id, kategori_id = %path.as_ref()))]
pub async fn get_kategori_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let kategori = app_state
    .store
    .get_kategori(path.into_inner())
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengambil data kategori"))?;

  Ok(HttpResponse::Ok().json(json!({ "data": kategori })))
}

#[instrument(name = "handler::create_kategori", skip(auth_user, app_state, req_payload), fields(user_id = %auth_user.user.id))]
pub async fn create_kategori_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateKategoriPayload>,
) -> Result<HttpResponse, AppError> {
  let CreateKategoriPayload { nama, deskripsi } = req_payload.into_inner();
  let nama = nama
    .filter(|nama| !nama.is_empty())
    .ok_or_else(|| AppError::Validation(REQUIRED_FIELDS.to_string()))?;

  let kategori = app_state
    .store
    .create_kategori(NewKategori { nama, deskripsi })
    .await
    .map_err(AppError::store("Gagal menambah kategori"))?;

  info!(kategori_id = %kategori.id, "Kategori created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Kategori berhasil ditambahkan",
      "data": kategori
  })))
}

#[instrument(
  name = "handler::update_kategori",
  skip(auth_user, app_state, path, req_payload),
  fields(user_id = %auth_user.user.id, kategori_id = %path.as_ref())
)]
pub async fn update_kategori_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<KategoriPatch>,
) -> Result<HttpResponse, AppError> {
  let patch = req_payload.into_inner();
  if patch.blanks_required() {
    return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
  }

  let kategori = app_state
    .store
    .update_kategori(path.into_inner(), patch)
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengupdate kategori"))?;

  info!("Kategori updated.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Kategori berhasil diupdate",
      "data": kategori
  })))
}

#[instrument(name = "handler::delete_kategori", skip(auth_user, app_state, path), fields(user_id = %auth_user.user.id, kategori_id = %path.as_ref()))]
pub async fn delete_kategori_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .store
    .delete_kategori(path.into_inner())
    .await
    .map_err(AppError::store("Gagal menghapus kategori"))?;

  info!("Kategori deleted.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Kategori berhasil dihapus" })))
}
