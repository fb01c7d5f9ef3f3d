// core/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
  pub id: Uuid,
  pub email: String,
  #[serde(skip_serializing)] // Never send the password hash to a client
  pub password_hash: String,
  pub name: String,
  pub role: String,
  pub avatar: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Insert payload. The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
  pub name: String,
  pub role: String,
  pub avatar: Option<String>,
}

/// Built by the HTTP layer after hashing any new password, so it carries no
/// serde impl of its own.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
  pub email: Option<String>,
  pub password_hash: Option<String>,
  pub name: Option<String>,
  pub role: Option<String>,
  pub avatar: Option<Option<String>>,
}

impl UserPatch {
  pub fn blanks_required(&self) -> bool {
    super::blanked(&self.email) || super::blanked(&self.name) || super::blanked(&self.role)
  }

  pub fn apply_to(self, user: &mut User) {
    if let Some(email) = self.email {
      user.email = email;
    }
    if let Some(password_hash) = self.password_hash {
      user.password_hash = password_hash;
    }
    if let Some(name) = self.name {
      user.name = name;
    }
    if let Some(role) = self.role {
      user.role = role;
    }
    if let Some(avatar) = self.avatar {
      user.avatar = avatar;
    }
  }
}
