// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Record not found")]
  NotFound,

  /// A uniqueness or foreign-key rule of the store rejected the write.
  #[error("Constraint violated: {0}")]
  Constraint(String),

  #[error("Store backend failure. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
