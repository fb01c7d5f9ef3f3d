// server/src/services/seed_service.rs

use inventaris_core::{InventoryStore, NewUser};
use tracing::{info, instrument};

use crate::config::SeedAdmin;
use crate::errors::AppError;
use crate::services::auth_service;
use crate::web::handlers::user_handlers::default_avatar;

pub const ADMIN_ROLE: &str = "admin";

/// Creates the configured admin account unless a user with that e-mail exists.
/// Returns whether a user was created.
#[instrument(name = "seed_service::ensure_admin", skip(store, seed), fields(email = %seed.email))]
pub async fn ensure_admin(store: &dyn InventoryStore, seed: &SeedAdmin) -> Result<bool, AppError> {
  let existing = store
    .find_user_by_email(&seed.email)
    .await
    .map_err(AppError::store("Gagal memeriksa akun admin"))?;
  if existing.is_some() {
    info!("Seed admin already present; nothing to do.");
    return Ok(false);
  }

  let password_hash = auth_service::hash_password(&seed.password)?;
  let user = store
    .create_user(NewUser {
      email: seed.email.clone(),
      password_hash,
      name: seed.name.clone(),
      role: ADMIN_ROLE.to_string(),
      avatar: Some(default_avatar(&seed.name)),
    })
    .await
    .map_err(AppError::store("Gagal membuat akun admin"))?;

  info!(user_id = %user.id, "Seed admin created.");
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::auth_service::verify_password;
  use inventaris_core::MemoryStore;

  #[actix_web::test]
  async fn creates_admin_once() {
    let store = MemoryStore::new();
    let seed = SeedAdmin {
      email: "admin@example.com".to_string(),
      password: "admin123".to_string(),
      name: "Administrator".to_string(),
    };

    assert!(ensure_admin(&store, &seed).await.unwrap());
    assert!(!ensure_admin(&store, &seed).await.unwrap());

    let users = store.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, ADMIN_ROLE);
    assert!(verify_password(&users[0].password_hash, "admin123").unwrap());
  }
}
