//! Advisory lock stripes for check-then-act sequences that span stores.

use parking_lot::{Mutex, MutexGuard};

use crate::partition::{DEFAULT_PARTITIONS, partition_index};

/// A fixed array of mutexes addressed by the same hash as
/// [`ShardedStore`](crate::ShardedStore) partitions.
///
/// Holding the stripe for a token serialises every other holder of a token
/// that hashes to the same stripe. Stripes guard no data of their own.
pub struct LockStripes {
  stripes: Box<[Mutex<()>]>,
}

impl LockStripes {
  /// `count` stripes; zero is treated as one.
  pub fn new(count: usize) -> Self {
    let stripes = (0..count.max(1)).map(|_| Mutex::new(())).collect();
    Self { stripes }
  }

  pub fn stripe_count(&self) -> usize { self.stripes.len() }

  pub fn stripe_of(&self, token: &[u8]) -> usize {
    partition_index(token, self.stripes.len())
  }

  /// Block until the stripe owning `token` is free and hold it until the
  /// guard is dropped.
  pub fn lock(&self, token: &[u8]) -> MutexGuard<'_, ()> {
    self.stripes[self.stripe_of(token)].lock()
  }
}

impl Default for LockStripes {
  fn default() -> Self { Self::new(DEFAULT_PARTITIONS) }
}
