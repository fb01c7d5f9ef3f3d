// server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use inventaris_core::{NewUser, UserPatch};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

const REQUIRED_FIELDS: &str = "Email, password, nama, dan role harus diisi";
const NOT_FOUND: &str = "User tidak ditemukan";

/// Generated avatar used when a new account does not bring its own.
pub fn default_avatar(name: &str) -> String {
  format!(
    "https://ui-avatars.com/api/?name={}&background=random",
    urlencoding::encode(name)
  )
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_off_thread(password: String) -> Result<String, AppError> {
  web::block(move || auth_service::hash_password(&password))
    .await
    .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

// --- Request DTOs ---
#[derive(Deserialize)]
pub struct CreateUserPayload {
  pub email: Option<String>,
  pub password: Option<String>,
  pub name: Option<String>,
  pub role: Option<String>,
  pub avatar: Option<String>,
}

/// Mutable user columns. `password` is plain text here and is hashed before
/// it reaches the store; an empty password leaves the stored one untouched.
#[derive(Deserialize)]
pub struct UpdateUserPayload {
  pub email: Option<String>,
  pub password: Option<String>,
  pub name: Option<String>,
  pub role: Option<String>,
  #[serde(default, deserialize_with = "inventaris_core::models::double_option")]
  pub avatar: Option<Option<String>>,
}

#[instrument(name = "handler::list_users", skip(auth_user, app_state), fields(user_id = %auth_user.user.id))]
pub async fn list_users_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let users = app_state
    .store
    .list_users()
    .await
    .map_err(AppError::store("Gagal mengambil data user"))?;

  info!("Fetched {} users.", users.len());
  Ok(HttpResponse::Ok().json(json!({ "data": users })))
}

#[instrument(
  name = "handler::get_user",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, target_user_id = %path.as_ref())
)]
pub async fn get_user_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .store
    .get_user(path.into_inner())
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengambil data user"))?;

  Ok(HttpResponse::Ok().json(json!({ "data": user })))
}

#[instrument(
  name = "handler::create_user",
  skip(auth_user, app_state, req_payload),
  fields(user_id = %auth_user.user.id)
)]
pub async fn create_user_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateUserPayload>,
) -> Result<HttpResponse, AppError> {
  let CreateUserPayload {
    email,
    password,
    name,
    role,
    avatar,
  } = req_payload.into_inner();
  let (email, password, name, role) = match (email, password, name, role) {
    (Some(email), Some(password), Some(name), Some(role))
      if [&email, &password, &name, &role].iter().all(|field| !field.is_empty()) =>
    {
      (email, password, name, role)
    }
    _ => return Err(AppError::Validation(REQUIRED_FIELDS.to_string())),
  };

  let avatar = avatar
    .filter(|avatar| !avatar.is_empty())
    .unwrap_or_else(|| default_avatar(&name));
  let password_hash = hash_off_thread(password).await?;

  let user = app_state
    .store
    .create_user(NewUser {
      email,
      password_hash,
      name,
      role,
      avatar: Some(avatar),
    })
    .await
    .map_err(AppError::store("Gagal menambah user"))?;

  info!(created_user_id = %user.id, "User created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "User berhasil ditambahkan",
      "data": user
  })))
}

#[instrument(
  name = "handler::update_user",
  skip(auth_user, app_state, path, req_payload),
  fields(user_id = %auth_user.user.id, target_user_id = %path.as_ref())
)]
pub async fn update_user_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<UpdateUserPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let mut patch = UserPatch {
    email: payload.email,
    password_hash: None,
    name: payload.name,
    role: payload.role,
    avatar: payload.avatar,
  };
  if patch.blanks_required() {
    return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
  }
  if let Some(password) = payload.password.filter(|password| !password.is_empty()) {
    patch.password_hash = Some(hash_off_thread(password).await?);
  }

  let user = app_state
    .store
    .update_user(path.into_inner(), patch)
    .await
    .map_err(AppError::lookup(NOT_FOUND, "Gagal mengupdate user"))?;

  info!("User updated.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "User berhasil diupdate",
      "data": user
  })))
}

#[instrument(
  name = "handler::delete_user",
  skip(auth_user, app_state, path),
  fields(user_id = %auth_user.user.id, target_user_id = %path.as_ref())
)]
pub async fn delete_user_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .store
    .delete_user(path.into_inner())
    .await
    .map_err(AppError::store("Gagal menghapus user"))?;

  info!("User deleted.");
  Ok(HttpResponse::Ok().json(json!({ "message": "User berhasil dihapus" })))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_avatar_encodes_the_name() {
    assert_eq!(
      default_avatar("Budi Santoso"),
      "https://ui-avatars.com/api/?name=Budi%20Santoso&background=random"
    );
  }

  #[test]
  fn update_payload_keeps_absent_and_null_apart() {
    let absent: UpdateUserPayload = serde_json::from_str(r#"{"name": "Sari"}"#).unwrap();
    assert!(absent.avatar.is_none());

    let cleared: UpdateUserPayload = serde_json::from_str(r#"{"avatar": null}"#).unwrap();
    assert_eq!(cleared.avatar, Some(None));
  }
}
