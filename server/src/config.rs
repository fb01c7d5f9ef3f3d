// server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::fmt;

/// HS256 keys shorter than this are rejected at start-up.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  /// Process-local tables; data is lost on restart.
  Memory,
}

/// Wraps the session signing key so it never shows up in `Debug` output.
#[derive(Clone)]
pub struct SessionSecret(String);

impl SessionSecret {
  pub fn as_bytes(&self) -> &[u8] {
    self.0.as_bytes()
  }
}

impl fmt::Debug for SessionSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionSecret([REDACTED])")
  }
}

/// Admin account created at start-up when no user holds `email` yet.
#[derive(Clone)]
pub struct SeedAdmin {
  pub email: String,
  pub password: String,
  pub name: String,
}

impl fmt::Debug for SeedAdmin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SeedAdmin")
      .field("email", &self.email)
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  pub store_backend: StoreBackend,
  pub database_url: Option<String>,
  pub run_migrations: bool,

  pub session_secret: SessionSecret,
  pub session_ttl_hours: i64,
  pub cookie_secure: bool,

  pub seed_admin: Option<SeedAdmin>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. `from_env` passes the
  /// process environment; tests pass a map.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let parse_bool = |var_name: &str, default: bool| -> Result<bool> {
      match get_env(var_name) {
        Ok(raw) => raw
          .parse::<bool>()
          .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e))),
        Err(_) => Ok(default),
      }
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let store_backend = match get_env("STORE_BACKEND")
      .unwrap_or_else(|_| "postgres".to_string())
      .to_ascii_lowercase()
      .as_str()
    {
      "postgres" => StoreBackend::Postgres,
      "memory" => StoreBackend::Memory,
      other => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };
    let database_url = match store_backend {
      StoreBackend::Postgres => Some(get_env("DATABASE_URL")?),
      StoreBackend::Memory => get_env("DATABASE_URL").ok(),
    };
    let run_migrations = parse_bool("RUN_MIGRATIONS", true)?;

    let session_secret = get_env("SESSION_SECRET")?;
    if session_secret.len() < MIN_SESSION_SECRET_LEN {
      return Err(AppError::Config(format!(
        "SESSION_SECRET must be at least {} bytes long",
        MIN_SESSION_SECRET_LEN
      )));
    }
    let session_ttl_hours = get_env("SESSION_TTL_HOURS")
      .unwrap_or_else(|_| "24".to_string())
      .parse::<i64>()
      .ok()
      .filter(|h| *h > 0)
      .ok_or_else(|| AppError::Config("Invalid SESSION_TTL_HOURS: expected a positive integer".to_string()))?;
    let cookie_secure = parse_bool("COOKIE_SECURE", false)?;

    let seed_admin = match (get_env("SEED_ADMIN_EMAIL"), get_env("SEED_ADMIN_PASSWORD")) {
      (Ok(email), Ok(password)) => Some(SeedAdmin {
        email,
        password,
        name: get_env("SEED_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
      }),
      (Err(_), Err(_)) => None,
      _ => {
        return Err(AppError::Config(
          "SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together".to_string(),
        ))
      }
    };

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      run_migrations,
      session_secret: SessionSecret(session_secret),
      session_ttl_hours,
      cookie_secure,
      seed_admin,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  const SECRET: &str = "0123456789abcdef0123456789abcdef";

  fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|name| map.get(name).cloned())
  }

  #[test]
  fn defaults_for_memory_backend() {
    let config = load(&[("STORE_BACKEND", "memory"), ("SESSION_SECRET", SECRET)]).unwrap();
    assert_eq!(config.store_backend, StoreBackend::Memory);
    assert_eq!(config.server_address(), "127.0.0.1:8080");
    assert_eq!(config.session_ttl_hours, 24);
    assert!(!config.cookie_secure);
    assert!(config.run_migrations);
    assert!(config.seed_admin.is_none());
  }

  #[test]
  fn postgres_requires_database_url() {
    let err = load(&[("SESSION_SECRET", SECRET)]).unwrap_err();
    assert!(matches!(err, AppError::Config(m) if m.contains("DATABASE_URL")));

    let config = load(&[("SESSION_SECRET", SECRET), ("DATABASE_URL", "postgres://localhost/inventaris")]).unwrap();
    assert_eq!(config.store_backend, StoreBackend::Postgres);
  }

  #[test]
  fn rejects_short_secret_and_bad_numbers() {
    assert!(load(&[("STORE_BACKEND", "memory"), ("SESSION_SECRET", "short")]).is_err());
    assert!(load(&[("STORE_BACKEND", "memory"), ("SESSION_SECRET", SECRET), ("SERVER_PORT", "http")]).is_err());
    assert!(load(&[("STORE_BACKEND", "memory"), ("SESSION_SECRET", SECRET), ("SESSION_TTL_HOURS", "0")]).is_err());
    assert!(load(&[("STORE_BACKEND", "sqlite"), ("SESSION_SECRET", SECRET)]).is_err());
  }

  #[test]
  fn seed_admin_needs_both_credentials() {
    let half = load(&[
      ("STORE_BACKEND", "memory"),
      ("SESSION_SECRET", SECRET),
      ("SEED_ADMIN_EMAIL", "admin@example.com"),
    ]);
    assert!(half.is_err());

    let config = load(&[
      ("STORE_BACKEND", "memory"),
      ("SESSION_SECRET", SECRET),
      ("SEED_ADMIN_EMAIL", "admin@example.com"),
      ("SEED_ADMIN_PASSWORD", "rahasia"),
    ])
    .unwrap();
    let seed = config.seed_admin.unwrap();
    assert_eq!(seed.name, "Administrator");
    assert!(!format!("{:?}", seed).contains("rahasia"));
    assert!(!format!("{:?}", config.session_secret).contains(SECRET));
  }
}
