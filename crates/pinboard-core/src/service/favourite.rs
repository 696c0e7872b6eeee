use std::sync::Arc;

use chrono::Utc;
use pinboard_store::{LockStripes, ShardedStore};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{AssetService, UserService, insert};
use crate::{
  Error, Result,
  favourite::{Favourite, ResolvedFavourite},
};

/// Owns the favourite collection and checks every new favourite against the
/// user and asset collections.
///
/// There is no transaction across the three stores. `add_favourite` holds
/// the lock stripe for the user while it checks references and scans for a
/// duplicate, so concurrent additions for the same user are serialised and a
/// `(user, asset)` pair is recorded at most once. Deleting a user or asset
/// later does not touch its favourites.
pub struct FavouriteService {
  store:      ShardedStore<Uuid, Favourite>,
  users:      Arc<UserService>,
  assets:     Arc<AssetService>,
  user_locks: LockStripes,
}

impl FavouriteService {
  pub fn new(
    partitions: usize,
    users: Arc<UserService>,
    assets: Arc<AssetService>,
  ) -> Self {
    Self {
      store: ShardedStore::with_partitions(partitions),
      users,
      assets,
      user_locks: LockStripes::new(partitions),
    }
  }

  /// Record that `user_id` favourites `asset_id`.
  ///
  /// Fails with [`Error::UserNotFound`] or [`Error::AssetNotFound`] if either
  /// side is missing and with [`Error::DuplicateFavourite`] if the pair is
  /// already recorded. Nothing is written on failure.
  pub fn add_favourite(&self, user_id: Uuid, asset_id: Uuid) -> Result<Favourite> {
    let _guard = self.user_locks.lock(user_id.as_bytes());

    self.users.get_user(user_id)?;
    let asset = self.assets.get_asset(asset_id)?;

    if self.find_pair(user_id, asset_id).is_some() {
      warn!(%user_id, %asset_id, "rejected duplicate favourite");
      return Err(Error::DuplicateFavourite { user_id, asset_id });
    }

    let favourite = insert(&self.store, Favourite {
      favourite_id: Uuid::new_v4(),
      user_id,
      asset_id,
      asset_type: asset.kind(),
      created_at: Utc::now(),
    })?;
    debug!(
      favourite_id = %favourite.favourite_id,
      %user_id,
      %asset_id,
      "added favourite"
    );
    Ok(favourite)
  }

  /// Delete a favourite. The referenced user and asset are not consulted.
  pub fn remove_favourite(&self, favourite_id: Uuid) -> Result<Favourite> {
    let removed = self
      .store
      .delete(&favourite_id)
      .map_err(|_| Error::FavouriteNotFound(favourite_id))?;
    debug!(%favourite_id, "removed favourite");
    Ok(removed)
  }

  pub fn get_favourite(&self, favourite_id: Uuid) -> Result<Favourite> {
    self
      .store
      .get(&favourite_id)
      .map_err(|_| Error::FavouriteNotFound(favourite_id))
  }

  /// All favourites held by an existing user, oldest first.
  pub fn list_favourites_by_user(&self, user_id: Uuid) -> Result<Vec<Favourite>> {
    self.users.get_user(user_id)?;
    let mut favourites = self.store.list_where(|f| f.user_id == user_id);
    favourites.sort_by_key(|f| (f.created_at, f.favourite_id));
    Ok(favourites)
  }

  /// Like [`list_favourites_by_user`](Self::list_favourites_by_user), with
  /// each favourite joined to the current state of its asset.
  pub fn list_resolved_favourites(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<ResolvedFavourite>> {
    let favourites = self.list_favourites_by_user(user_id)?;
    Ok(
      favourites
        .into_iter()
        .map(|favourite| {
          let asset = self.assets.get_asset(favourite.asset_id).ok();
          ResolvedFavourite { favourite, asset }
        })
        .collect(),
    )
  }

  pub fn len(&self) -> usize { self.store.len() }

  pub fn is_empty(&self) -> bool { self.store.is_empty() }

  fn find_pair(&self, user_id: Uuid, asset_id: Uuid) -> Option<Favourite> {
    self
      .store
      .list_where(|f| f.user_id == user_id && f.asset_id == asset_id)
      .into_iter()
      .next()
  }
}
