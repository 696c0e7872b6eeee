//! [`Catalog`]: the composition root for the three collections.

use std::sync::Arc;

use pinboard_store::DEFAULT_PARTITIONS;
use serde::Deserialize;

use crate::service::{AssetService, FavouriteService, UserService};

/// Sizing for the stores a [`Catalog`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
  /// Partitions per store. Fixed for the lifetime of the catalog.
  #[serde(default = "default_partitions")]
  pub partitions: usize,
}

fn default_partitions() -> usize { DEFAULT_PARTITIONS }

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      partitions: DEFAULT_PARTITIONS,
    }
  }
}

/// One set of stores and services, built once and shared by handle.
///
/// Cloning is cheap; every clone refers to the same collections.
#[derive(Clone)]
pub struct Catalog {
  pub users:      Arc<UserService>,
  pub assets:     Arc<AssetService>,
  pub favourites: Arc<FavouriteService>,
}

impl Catalog {
  pub fn new(config: CatalogConfig) -> Self {
    let users = Arc::new(UserService::new(config.partitions));
    let assets = Arc::new(AssetService::new(config.partitions));
    let favourites = Arc::new(FavouriteService::new(
      config.partitions,
      Arc::clone(&users),
      Arc::clone(&assets),
    ));
    tracing::info!(partitions = config.partitions, "catalog ready");
    Self {
      users,
      assets,
      favourites,
    }
  }
}

impl Default for Catalog {
  fn default() -> Self { Self::new(CatalogConfig::default()) }
}
