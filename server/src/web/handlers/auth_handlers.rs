// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

/// Unknown e-mail, wrong password and lookup failures all answer with this.
const INVALID_CREDENTIALS: &str = "Email atau password salah";

fn invalid_credentials() -> AppError {
  AppError::Auth(INVALID_CREDENTIALS.to_string())
}

// --- Request DTOs ---
#[derive(Deserialize)]
pub struct LoginRequestPayload {
  pub email: Option<String>,
  pub password: Option<String>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::login", skip(app_state, req_payload))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let LoginRequestPayload { email, password } = req_payload.into_inner();
  let (email, password) = match (email, password) {
    (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => (email, password),
    _ => return Err(AppError::Validation("Email dan password harus diisi".to_string())),
  };

  let user = match app_state.store.find_user_by_email(&email).await {
    Ok(Some(user)) => user,
    Ok(None) => {
      warn!("Login rejected: unknown e-mail.");
      return Err(invalid_credentials());
    }
    Err(e) => {
      error!(error = %e, "Login rejected: user lookup failed.");
      return Err(invalid_credentials());
    }
  };

  let password_hash = user.password_hash.clone();
  let verified = web::block(move || auth_service::verify_password(&password_hash, &password)).await;
  match verified {
    Ok(Ok(true)) => {}
    Ok(Ok(false)) => {
      warn!(user_id = %user.id, "Login rejected: password mismatch.");
      return Err(invalid_credentials());
    }
    Ok(Err(e)) => {
      error!(user_id = %user.id, error = %e, "Login rejected: stored hash unusable.");
      return Err(invalid_credentials());
    }
    Err(e) => {
      error!(error = %e, "Password verification task failed.");
      return Err(invalid_credentials());
    }
  }

  let token = app_state.sessions.issue(user.id)?;
  let cookie = app_state.sessions.session_cookie(token, app_state.config.cookie_secure);

  info!(user_id = %user.id, "Login successful.");
  Ok(HttpResponse::Ok().cookie(cookie).json(json!({
      "message": "Login berhasil",
      "user": user
  })))
}

#[instrument(name = "handler::me", skip(auth_user), fields(user_id = %auth_user.user.id))]
pub async fn me_handler(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(json!({ "user": auth_user.user })))
}

/// Always succeeds; the browser is told to drop the cookie whether or not it held a session.
#[instrument(name = "handler::logout", skip(app_state))]
pub async fn logout_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let cookie = app_state.sessions.removal_cookie(app_state.config.cookie_secure);
  Ok(HttpResponse::Ok().cookie(cookie).json(json!({ "message": "Logout berhasil" })))
}
