//! Error types for `pinboard-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::asset::AssetKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("asset not found: {0}")]
  AssetNotFound(Uuid),

  #[error("favourite not found: {0}")]
  FavouriteNotFound(Uuid),

  #[error("identifier already in use: {0}")]
  AlreadyExists(Uuid),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("user {user_id} has already favourited asset {asset_id}")]
  DuplicateFavourite { user_id: Uuid, asset_id: Uuid },

  #[error("unknown asset type: {0:?}")]
  UnknownAssetType(String),

  #[error("asset is a {existing}, cannot apply {requested} changes")]
  AssetTypeMismatch {
    existing:  AssetKind,
    requested: AssetKind,
  },

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("invalid identifier: {0:?}")]
  InvalidId(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("missing required role: {0}")]
  Forbidden(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`], independent of which entity it
/// concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  InvalidArgument,
  Unauthorized,
  Forbidden,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::UserNotFound(_)
      | Self::AssetNotFound(_)
      | Self::FavouriteNotFound(_) => ErrorKind::NotFound,
      Self::AlreadyExists(_)
      | Self::EmailTaken(_)
      | Self::DuplicateFavourite { .. } => ErrorKind::Conflict,
      Self::UnknownAssetType(_)
      | Self::AssetTypeMismatch { .. }
      | Self::InvalidArgument(_)
      | Self::InvalidId(_)
      | Self::Serialization(_) => ErrorKind::InvalidArgument,
      Self::Unauthorized => ErrorKind::Unauthorized,
      Self::Forbidden(_) => ErrorKind::Forbidden,
    }
  }

  pub(crate) fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse a textual identifier, as received from a caller.
pub fn parse_id(raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw.trim()).map_err(|_| Error::InvalidId(raw.to_owned()))
}
