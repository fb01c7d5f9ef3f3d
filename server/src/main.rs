// server/src/main.rs

mod config;
mod db;
mod errors;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::db::PgStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use inventaris_core::{InventoryStore, MemoryStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting inventaris server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(anyhow::anyhow!("Configuration error: {}", e));
    }
  };

  let store = build_store(&app_config).await?;

  if let Some(seed) = &app_config.seed_admin {
    services::seed_service::ensure_admin(store.as_ref(), seed)
      .await
      .map_err(|e| anyhow::anyhow!("Seeding the admin account failed: {}", e))?;
  }

  let app_state = AppState::new(store, app_config.clone());

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}

async fn build_store(app_config: &AppConfig) -> anyhow::Result<Arc<dyn InventoryStore>> {
  match app_config.store_backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost when the process exits.");
      Ok(Arc::new(MemoryStore::new()))
    }
    StoreBackend::Postgres => {
      let database_url = app_config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;
      let pool = PgPoolOptions::new()
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");

      let store = PgStore::new(pool);
      if app_config.run_migrations {
        store.migrate().await.context("Database migration failed")?;
        tracing::info!("Database migrations applied.");
      }
      Ok(Arc::new(store))
    }
  }
}
