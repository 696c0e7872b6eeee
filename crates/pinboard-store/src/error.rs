//! Error type for `pinboard-store`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("key not found: {0}")]
  NotFound(String),

  #[error("key already exists: {0}")]
  AlreadyExists(String),
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

  pub fn is_already_exists(&self) -> bool {
    matches!(self, Self::AlreadyExists(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
