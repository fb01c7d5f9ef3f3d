// server/src/web/handlers/ruangan_handlers.rs

use actix_web::{web, HttpResponse};
use inventaris_core::{NewRuangan, RuanganPatch};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

const REQUIRED_FIELDS: &str = "Nama ruangan harus diisi";
const NOT_FOUND: &str = "Ruangan tidak ditemukan";

#[derive(Deserialize, Debug)]
pub struct CreateRuanganPayload {
  pub nama: Option<String>,
  pub lokasi: Option<String>,
  pub deskripsi: Option<String>,
}

#[instrument(name = "handler::list_ruangan", skip(auth_user, app_state), fields(user_id = %auth_user.user.id))]
pub async fn list_ruangan_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let ruangan = app_state
    .store
    .list_ruangan()
    .await
    .map_err(AppError::store("Gagal mengambil data ruangan"))?;

  info!("Fetched {} ruangan.", ruangan.len());
  Ok(HttpResponse::Ok().json(json!({ "data": ruangan })))
}

#[instrument(
  name = "handler::get_ruangan",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, ruangan_id = %path.as_ref())
)]
pub async fn get_ruangan_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let ruangan = app_state
    .store
    .get_ruangan(path.into_inner())
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengambil data ruangan"))?;

  Ok(HttpResponse::Ok().json(json!({ "data": ruangan })))
}

#[instrument(
  name = "handler::create_ruangan",
  skip(auth_user, app_state, req_payload),
  fields(user_id = %auth_user.user.id)
)]
pub async fn create_ruangan_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateRuanganPayload>,
) -> Result<HttpResponse, AppError> {
  let CreateRuanganPayload { nama, lokasi, deskripsi } = req_payload.into_inner();
  let nama = nama
    .filter(|nama| !nama.is_empty())
    .ok_or_else(|| AppError::Validation(REQUIRED_FIELDS.to_string()))?;

  let ruangan = app_state
    .store
    .create_ruangan(NewRuangan { nama, lokasi, deskripsi })
    .await
    .map_err(AppError::store("Gagal menambah ruangan"))?;

  info!(ruangan_id = %ruangan.id, "Ruangan created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Ruangan berhasil ditambahkan",
      "data": ruangan
  })))
}

#[instrument(
  name = "handler::update_ruangan",
  skip(auth_user, app_state, path, req_payload),
  fields(user_id = %auth_user.user.id, ruangan_id = %path.as_ref())
)]
pub async fn update_ruangan_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<RuanganPatch>,
) -> Result<HttpResponse, AppError> {
  let patch = req_payload.into_inner();
  if patch.blanks_required() {
    return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
  }

  let ruangan = app_state
    .store
    .update_ruangan(path.into_inner(), patch)
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengupdate ruangan"))?;

  info!("Ruangan updated.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Ruangan berhasil diupdate",
      "data": ruangan
  })))
}

#[instrument(
  name = "handler::delete_ruangan",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, ruangan_id = %path.as_ref())
)]
pub async fn delete_ruangan_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .store
    .delete_ruangan(path.into_inner())
    .await
    .map_err(AppError::store("Gagal menghapus ruangan"))?;

  info!("Ruangan deleted.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Ruangan berhasil dihapus" })))
}
