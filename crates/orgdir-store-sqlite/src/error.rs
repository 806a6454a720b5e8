//! Error type for `orgdir-store-sqlite`.

use orgdir_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] orgdir_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl StoreError for Error {
  fn as_domain(&self) -> Option<&orgdir_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      Self::Database(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
