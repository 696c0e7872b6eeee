use chrono::Utc;
use pinboard_store::ShardedStore;
use tracing::debug;
use uuid::Uuid;

use super::insert;
use crate::{
  Error, Result,
  asset::{Asset, AssetKind, AssetUpdate, NewAsset},
};

/// Owns the asset collection.
pub struct AssetService {
  store: ShardedStore<Uuid, Asset>,
}

impl AssetService {
  pub fn new(partitions: usize) -> Self {
    Self {
      store: ShardedStore::with_partitions(partitions),
    }
  }

  pub fn create_asset(&self, input: NewAsset) -> Result<Asset> {
    input.body.validate()?;
    let now = Utc::now();
    let asset = insert(&self.store, Asset {
      asset_id:    Uuid::new_v4(),
      description: input.description,
      body:        input.body,
      created_at:  now,
      updated_at:  now,
    })?;
    debug!(asset_id = %asset.asset_id, kind = %asset.kind(), "created asset");
    Ok(asset)
  }

  pub fn get_asset(&self, id: Uuid) -> Result<Asset> {
    self.store.get(&id).map_err(|_| Error::AssetNotFound(id))
  }

  /// Merge `update` into an existing asset.
  ///
  /// Fails with [`Error::AssetTypeMismatch`] if the change set names a
  /// different variant than the stored asset; the stored asset is then left
  /// unchanged.
  pub fn update_asset(&self, id: Uuid, update: AssetUpdate) -> Result<Asset> {
    let now = Utc::now();
    let updated = self
      .store
      .modify(&id, |asset| update.apply(asset, now))
      .map_err(|_| Error::AssetNotFound(id))??;
    debug!(asset_id = %id, "updated asset");
    Ok(updated)
  }

  /// Remove an asset. Favourites that reference it are left in place.
  pub fn delete_asset(&self, id: Uuid) -> Result<Asset> {
    let removed = self.store.delete(&id).map_err(|_| Error::AssetNotFound(id))?;
    debug!(asset_id = %id, "deleted asset");
    Ok(removed)
  }

  /// All assets, or only those of `kind`.
  pub fn list_assets(&self, kind: Option<AssetKind>) -> Vec<Asset> {
    let mut assets = match kind {
      Some(kind) => self.store.list_where(|a| a.kind() == kind),
      None => self.store.list(),
    };
    assets.sort_by_key(|a| (a.created_at, a.asset_id));
    assets
  }

  pub fn len(&self) -> usize { self.store.len() }

  pub fn is_empty(&self) -> bool { self.store.is_empty() }
}
