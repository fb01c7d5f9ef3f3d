// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use inventaris_core::StoreError;
use serde_json::json;
use thiserror::Error;

/// Message shown to clients for every failure they cannot act on.
pub const GENERIC_SERVER_ERROR: &str = "Terjadi kesalahan server";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// A store operation failed. `message` is the localized text the client
  /// sees; `source` is only logged.
  #[error("Store Error: {message}. Source: {source}")]
  Store {
    message: String,
    #[source]
    source: StoreError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn unauthorized() -> Self {
    AppError::Auth("Unauthorized".to_string())
  }

  /// For writes and listings: every store failure is a 500 with `message`.
  pub fn store(message: &str) -> impl FnOnce(StoreError) -> AppError + '_ {
    move |source| AppError::Store {
      message: message.to_string(),
      source,
    }
  }

  /// For id lookups: a miss becomes a 404 with `not_found`, anything else a 500 with `message`.
  pub fn lookup<'a>(not_found: &'a str, message: &'a str) -> impl FnOnce(StoreError) -> AppError + 'a {
    move |source| match source {
      StoreError::NotFound => AppError::NotFound(not_found.to_string()),
      source => AppError::Store {
        message: message.to_string(),
        source,
      },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Store { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    match self {
      AppError::Store { source, .. } => {
        tracing::error!(application_error = %self, store_error = ?source, "Responding with store error");
      }
      AppError::Config(_) | AppError::Internal(_) => {
        tracing::error!(application_error = %self, "Responding with error");
      }
      _ => tracing::warn!(application_error = %self, "Rejecting request"),
    }

    let message = match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => m.as_str(),
      AppError::Store { message, .. } => message.as_str(),
      AppError::Config(_) | AppError::Internal(_) => GENERIC_SERVER_ERROR,
    };
    HttpResponse::build(self.status_code()).json(json!({ "error": message }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_maps_miss_to_not_found() {
    let err = AppError::lookup("Kategori tidak ditemukan", "Gagal mengambil data kategori")(StoreError::NotFound);
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Kategori tidak ditemukan"));
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let err = AppError::lookup("Kategori tidak ditemukan", "Gagal mengupdate kategori")(StoreError::Constraint(
      "nope".to_string(),
    ));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn internal_details_stay_out_of_the_body() {
    let response = AppError::Internal("argon2 blew up".to_string()).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = AppError::store("Gagal menambah barang")(StoreError::NotFound).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
