// server/src/services/session_service.rs

//! Signed session tokens carried in the `auth-token` cookie.
//!
//! A token is an HS256 JWT whose subject is the user id. Expiry is checked
//! with zero leeway, so an expired cookie is indistinguishable from a missing one.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "auth-token";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
}

#[derive(Clone)]
pub struct SessionKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  validation: Validation,
  ttl: Duration,
}

impl SessionKeys {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
    self.issue_at(user_id, Utc::now())
  }

  /// Mints a token as if the current time were `now`.
  #[instrument(name = "session_service::issue", skip(self))]
  pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, AppError> {
    let claims = SessionClaims {
      sub: user_id.to_string(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(|e| AppError::Internal(format!("Session token encoding failed: {}", e)))
  }

  /// Returns the user id of a well-formed, correctly signed, unexpired token.
  pub fn verify(&self, token: &str) -> Option<Uuid> {
    let data = match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
      Ok(data) => data,
      Err(e) => {
        debug!(error = %e, "Session token rejected.");
        return None;
      }
    };
    Uuid::parse_str(&data.claims.sub).ok()
  }

  pub fn session_cookie(&self, token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(secure)
      .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
      .finish()
  }

  /// An already-expired cookie that makes the browser drop the session.
  pub fn removal_cookie(&self, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(secure)
      .finish();
    cookie.make_removal();
    cookie
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn keys() -> SessionKeys {
    SessionKeys::new(b"0123456789abcdef0123456789abcdef", Duration::hours(24))
  }

  #[test]
  fn issued_token_verifies_to_the_same_user() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id).unwrap();
    assert_eq!(keys.verify(&token), Some(user_id));
  }

  #[test]
  fn expired_token_is_rejected() {
    let keys = keys();
    let issued_long_ago = Utc::now() - Duration::hours(25);
    let token = keys.issue_at(Uuid::new_v4(), issued_long_ago).unwrap();
    assert_eq!(keys.verify(&token), None);
  }

  #[test]
  fn foreign_signature_and_garbage_are_rejected() {
    let other = SessionKeys::new(b"ffffffffffffffffffffffffffffffff", Duration::hours(24));
    let token = other.issue(Uuid::new_v4()).unwrap();
    assert_eq!(keys().verify(&token), None);

    assert_eq!(keys().verify("not-a-token"), None);
    // The unsigned base64 `{userId, exp}` format is not accepted.
    assert_eq!(
      keys().verify("eyJ1c2VySWQiOiIxIiwiZXhwIjo5OTk5OTk5OTk5OTk5fQ=="),
      None
    );
  }

  #[test]
  fn cookie_attributes() {
    let keys = keys();
    let cookie = keys.session_cookie("abc".to_string(), true);
    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(CookieDuration::hours(24)));

    let removal = keys.removal_cookie(false);
    assert_eq!(removal.value(), "");
    assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
  }
}
