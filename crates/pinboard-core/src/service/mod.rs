//! Entity services.
//!
//! Each service owns one [`ShardedStore`] and is the only way entities of
//! its type are created. [`FavouriteService`] additionally reads through the
//! user and asset services to check references before it records anything.

mod asset;
mod favourite;
mod user;

pub use asset::AssetService;
pub use favourite::FavouriteService;
pub use user::UserService;

use pinboard_store::ShardedStore;
use uuid::Uuid;

use crate::{Entity, Error, Result};

/// Insert a freshly built entity under its own identifier.
fn insert<E: Entity>(store: &ShardedStore<Uuid, E>, entity: E) -> Result<E> {
  let id = entity.id();
  store
    .create(id, entity.clone())
    .map_err(|_| Error::AlreadyExists(id))?;
  Ok(entity)
}
