//! The capability shared by everything a [`ShardedStore`] holds.
//!
//! [`ShardedStore`]: pinboard_store::ShardedStore

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A value with a stable identifier, assigned once by its owning service.
pub trait Entity: Clone + Send + Sync + 'static {
  fn id(&self) -> Uuid;

  fn created_at(&self) -> DateTime<Utc>;
}
