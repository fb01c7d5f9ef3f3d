// server/src/state.rs
use crate::config::AppConfig;
use crate::services::session_service::SessionKeys;
use chrono::Duration;
use inventaris_core::InventoryStore;
use std::sync::Arc;

/// Everything a handler needs, built once in `main` and cloned per worker.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn InventoryStore>,
  pub sessions: SessionKeys,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn InventoryStore>, config: Arc<AppConfig>) -> Self {
    let sessions = SessionKeys::new(
      config.session_secret.as_bytes(),
      Duration::hours(config.session_ttl_hours),
    );
    Self {
      store,
      sessions,
      config,
    }
  }
}
