//! Favourite: a user's bookmark on an asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Entity,
  asset::{Asset, AssetKind},
};

/// A `(user, asset)` pair recorded by the favourite coordinator.
///
/// `asset_type` is copied from the asset when the favourite is created and
/// is not kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favourite {
  pub favourite_id: Uuid,
  pub user_id:      Uuid,
  pub asset_id:     Uuid,
  pub asset_type:   AssetKind,
  pub created_at:   DateTime<Utc>,
}

impl Entity for Favourite {
  fn id(&self) -> Uuid { self.favourite_id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

/// A favourite bundled with the current state of the asset it points at.
///
/// Deleting an asset does not delete favourites that reference it; such a
/// favourite resolves with `asset: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFavourite {
  pub favourite: Favourite,
  pub asset:     Option<Asset>,
}

impl ResolvedFavourite {
  pub fn is_dangling(&self) -> bool { self.asset.is_none() }
}
