// server/src/web/extractors.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use inventaris_core::User;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::services::session_service::SESSION_COOKIE;
use crate::state::AppState;

/// The signed-in user behind the request's session cookie.
///
/// Declare it as the first handler argument: it rejects a missing or invalid
/// cookie before the body or path are looked at, so every unauthenticated API
/// call answers 401.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user: User,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let app_state = req.app_data::<web::Data<AppState>>().cloned();
    let token = req.cookie(SESSION_COOKIE).map(|cookie| cookie.value().to_string());

    Box::pin(async move {
      let app_state =
        app_state.ok_or_else(|| AppError::Internal("AppState is not registered with the application".to_string()))?;

      let user_id = token
        .as_deref()
        .and_then(|token| app_state.sessions.verify(token))
        .ok_or_else(|| {
          debug!("Request carries no valid session cookie.");
          AppError::unauthorized()
        })?;

      match app_state.store.get_user(user_id).await {
        Ok(user) => Ok(AuthenticatedUser { user }),
        Err(e) => {
          warn!(user_id = %user_id, error = %e, "Session user could not be loaded.");
          Err(AppError::unauthorized())
        }
      }
    })
  }
}
