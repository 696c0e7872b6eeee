//! The contract with the external identity provider.
//!
//! Token verification itself happens outside this crate. Services trust that
//! callers have already authenticated; the boundary layer uses
//! [`Identity::require_role`] to gate administrative operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Error;

/// Role required to create, update, or delete users and assets.
pub const ADMIN_ROLE: &str = "admin";

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  /// Stable subject identifier issued by the identity provider.
  pub subject:  String,
  pub username: Option<String>,
  pub email:    Option<String>,
  #[serde(default)]
  pub roles:    BTreeSet<String>,
}

impl Identity {
  pub fn has_role(&self, role: &str) -> bool { self.roles.contains(role) }

  pub fn require_role(&self, role: &str) -> Result<(), Error> {
    if self.has_role(role) {
      Ok(())
    } else {
      Err(Error::Forbidden(role.to_owned()))
    }
  }
}

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("missing bearer token")]
  MissingToken,

  #[error("invalid or expired token")]
  InvalidToken,
}

impl From<AuthError> for Error {
  fn from(_: AuthError) -> Self { Error::Unauthorized }
}

/// Turns a bearer token into an [`Identity`].
pub trait Authenticator: Send + Sync {
  fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn require_role_distinguishes_admin() {
    let mut identity = Identity {
      subject:  "sub-1".into(),
      username: Some("ada".into()),
      email:    None,
      roles:    BTreeSet::new(),
    };
    assert!(matches!(
      identity.require_role(ADMIN_ROLE),
      Err(Error::Forbidden(r)) if r == "admin"
    ));

    identity.roles.insert(ADMIN_ROLE.to_owned());
    assert!(identity.require_role(ADMIN_ROLE).is_ok());
  }
}
