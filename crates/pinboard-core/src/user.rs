//! User: an account that can hold favourites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Entity, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub name:       String,
  /// Unique across users, compared case-insensitively.
  pub email:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Entity for User {
  fn id(&self) -> Uuid { self.user_id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

/// Input to [`crate::service::UserService::create_user`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub name:  String,
  pub email: String,
}

impl NewUser {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name:  name.into(),
      email: email.into(),
    }
  }

  pub(crate) fn validate(&self) -> Result<()> {
    validate_name(&self.name)?;
    validate_email(&self.email)
  }
}

/// Fields a caller may change on an existing user. `None` leaves the field
/// as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
  pub name:  Option<String>,
  pub email: Option<String>,
}

impl UserUpdate {
  pub(crate) fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      validate_name(name)?;
    }
    if let Some(email) = &self.email {
      validate_email(email)?;
    }
    Ok(())
  }

  pub(crate) fn apply(self, user: &mut User, now: DateTime<Utc>) {
    if let Some(name) = self.name {
      user.name = name.trim().to_owned();
    }
    if let Some(email) = self.email {
      user.email = email.trim().to_owned();
    }
    user.updated_at = now;
  }
}

/// Canonical form used for uniqueness comparisons.
pub fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::invalid("user name must not be blank"));
  }
  Ok(())
}

fn validate_email(email: &str) -> Result<()> {
  let email = email.trim();
  if email.is_empty() {
    return Err(Error::invalid("email must not be blank"));
  }
  match email.split_once('@') {
    Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
    _ => Err(Error::invalid(format!("malformed email: {email:?}"))),
  }
}
