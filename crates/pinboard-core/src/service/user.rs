use chrono::Utc;
use pinboard_store::{LockStripes, ShardedStore};
use tracing::{debug, warn};
use uuid::Uuid;

use super::insert;
use crate::{
  Error, Result,
  user::{NewUser, User, UserUpdate, normalize_email},
};

/// Owns the user collection.
///
/// Email uniqueness is checked by scanning the collection. The scan and the
/// following write run while holding the lock stripe for the normalised
/// address, so two callers racing on the same email are serialised.
pub struct UserService {
  store:       ShardedStore<Uuid, User>,
  email_locks: LockStripes,
}

impl UserService {
  pub fn new(partitions: usize) -> Self {
    Self {
      store:       ShardedStore::with_partitions(partitions),
      email_locks: LockStripes::new(partitions),
    }
  }

  pub fn create_user(&self, input: NewUser) -> Result<User> {
    input.validate()?;
    let email_key = normalize_email(&input.email);
    let _guard = self.email_locks.lock(email_key.as_bytes());

    if let Some(existing) = self.find_by_email(&email_key) {
      warn!(user_id = %existing.user_id, "rejected duplicate email");
      return Err(Error::EmailTaken(input.email.trim().to_owned()));
    }

    let now = Utc::now();
    let user = insert(&self.store, User {
      user_id:    Uuid::new_v4(),
      name:       input.name.trim().to_owned(),
      email:      input.email.trim().to_owned(),
      created_at: now,
      updated_at: now,
    })?;
    debug!(user_id = %user.user_id, "created user");
    Ok(user)
  }

  pub fn get_user(&self, id: Uuid) -> Result<User> {
    self.store.get(&id).map_err(|_| Error::UserNotFound(id))
  }

  pub fn contains(&self, id: Uuid) -> bool { self.store.contains(&id) }

  /// Apply `update` to an existing user. The identifier and creation time
  /// are never changed; `updated_at` is refreshed.
  pub fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User> {
    update.validate()?;
    let email_key = update.email.as_deref().map(normalize_email);
    let _guard = email_key
      .as_ref()
      .map(|key| self.email_locks.lock(key.as_bytes()));

    if !self.contains(id) {
      return Err(Error::UserNotFound(id));
    }
    if let Some(key) = &email_key
      && let Some(other) = self.find_by_email(key)
      && other.user_id != id
    {
      warn!(user_id = %id, other = %other.user_id, "rejected duplicate email");
      return Err(Error::EmailTaken(other.email));
    }

    let now = Utc::now();
    let updated = self
      .store
      .modify(&id, |user| {
        update.apply(user, now);
        Ok::<_, Error>(())
      })
      .map_err(|_| Error::UserNotFound(id))??;
    debug!(user_id = %id, "updated user");
    Ok(updated)
  }

  /// Remove a user. Favourites that reference it are left in place.
  pub fn delete_user(&self, id: Uuid) -> Result<User> {
    let removed = self.store.delete(&id).map_err(|_| Error::UserNotFound(id))?;
    debug!(user_id = %id, "deleted user");
    Ok(removed)
  }

  pub fn list_users(&self) -> Vec<User> {
    let mut users = self.store.list();
    users.sort_by_key(|u| (u.created_at, u.user_id));
    users
  }

  /// The first user whose email matches `email`, ignoring case.
  pub fn find_by_email(&self, email: &str) -> Option<User> {
    let key = normalize_email(email);
    self
      .store
      .list_where(|u| normalize_email(&u.email) == key)
      .into_iter()
      .next()
  }

  pub fn len(&self) -> usize { self.store.len() }

  pub fn is_empty(&self) -> bool { self.store.is_empty() }
}
