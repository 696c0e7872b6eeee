//! [`ShardedStore`]: the partitioned map shared by every entity collection.

use std::{collections::HashMap, fmt::Display, hash::Hash};

use parking_lot::RwLock;

use crate::{
  Error, Result,
  partition::{DEFAULT_PARTITIONS, partition_index},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A concurrent map split into independently locked partitions.
///
/// Values handed out by the store are clones; the stored value is only ever
/// changed through [`create`](Self::create), [`update`](Self::update),
/// [`modify`](Self::modify) or [`delete`](Self::delete). No lock is held
/// across partitions, so [`list`](Self::list) observes each partition at a
/// different moment.
pub struct ShardedStore<K, V> {
  partitions: Box<[RwLock<HashMap<K, V>>]>,
}

impl<K, V> ShardedStore<K, V>
where
  K: Eq + Hash + Clone + Display + AsRef<[u8]>,
  V: Clone,
{
  /// A store with [`DEFAULT_PARTITIONS`] partitions.
  pub fn new() -> Self { Self::with_partitions(DEFAULT_PARTITIONS) }

  /// A store with `count` partitions. A count of zero is treated as one.
  pub fn with_partitions(count: usize) -> Self {
    let partitions = (0..count.max(1))
      .map(|_| RwLock::new(HashMap::new()))
      .collect();
    Self { partitions }
  }

  pub fn partition_count(&self) -> usize { self.partitions.len() }

  /// Index of the partition that owns `key`.
  pub fn partition_of(&self, key: &K) -> usize {
    partition_index(key.as_ref(), self.partitions.len())
  }

  fn partition(&self, key: &K) -> (usize, &RwLock<HashMap<K, V>>) {
    let index = self.partition_of(key);
    (index, &self.partitions[index])
  }

  // ── Single-key operations ─────────────────────────────────────────────

  /// Insert `value` under `key`. Fails if the key is already present; the
  /// existing value is left untouched.
  pub fn create(&self, key: K, value: V) -> Result<()> {
    let (index, partition) = self.partition(&key);
    let mut map = partition.write();
    if map.contains_key(&key) {
      return Err(Error::AlreadyExists(key.to_string()));
    }
    tracing::trace!(partition = index, %key, "insert");
    map.insert(key, value);
    Ok(())
  }

  pub fn get(&self, key: &K) -> Result<V> {
    let (_, partition) = self.partition(key);
    partition
      .read()
      .get(key)
      .cloned()
      .ok_or_else(|| Error::NotFound(key.to_string()))
  }

  pub fn contains(&self, key: &K) -> bool {
    let (_, partition) = self.partition(key);
    partition.read().contains_key(key)
  }

  /// Replace the value stored under `key`.
  pub fn update(&self, key: K, value: V) -> Result<()> {
    let (index, partition) = self.partition(&key);
    let mut map = partition.write();
    let slot = map
      .get_mut(&key)
      .ok_or_else(|| Error::NotFound(key.to_string()))?;
    tracing::trace!(partition = index, %key, "replace");
    *slot = value;
    Ok(())
  }

  /// Merge a change into the value under `key` while holding the partition's
  /// write lock.
  ///
  /// `f` operates on a copy of the stored value. The copy replaces the
  /// stored value only when `f` returns `Ok`, so a rejected change leaves the
  /// store exactly as it was. The outer `Result` reports a missing key; the
  /// inner one carries the outcome of `f`, and on success the committed
  /// value.
  pub fn modify<E>(
    &self,
    key: &K,
    f: impl FnOnce(&mut V) -> Result<(), E>,
  ) -> Result<Result<V, E>> {
    let (index, partition) = self.partition(key);
    let mut map = partition.write();
    let slot = map
      .get_mut(key)
      .ok_or_else(|| Error::NotFound(key.to_string()))?;

    let mut draft = slot.clone();
    if let Err(e) = f(&mut draft) {
      return Ok(Err(e));
    }
    tracing::trace!(partition = index, %key, "merge");
    *slot = draft.clone();
    Ok(Ok(draft))
  }

  /// Remove and return the value under `key`.
  pub fn delete(&self, key: &K) -> Result<V> {
    let (index, partition) = self.partition(key);
    let removed = partition
      .write()
      .remove(key)
      .ok_or_else(|| Error::NotFound(key.to_string()))?;
    tracing::trace!(partition = index, %key, "remove");
    Ok(removed)
  }

  // ── Scans ─────────────────────────────────────────────────────────────

  /// Every value in the store, partition by partition.
  pub fn list(&self) -> Vec<V> { self.list_where(|_| true) }

  /// Every value matching `predicate`. Each partition's read lock is taken
  /// and released in turn; the result is not a consistent snapshot.
  pub fn list_where(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
    let mut out = Vec::new();
    for partition in self.partitions.iter() {
      let map = partition.read();
      out.extend(map.values().filter(|v| predicate(v)).cloned());
    }
    out
  }

  /// Number of stored entries, summed partition by partition.
  pub fn len(&self) -> usize {
    self.partitions.iter().map(|p| p.read().len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.partitions.iter().all(|p| p.read().is_empty())
  }

  /// Per-partition entry counts, in partition order.
  pub fn partition_sizes(&self) -> Vec<usize> {
    self.partitions.iter().map(|p| p.read().len()).collect()
  }
}

impl<K, V> Default for ShardedStore<K, V>
where
  K: Eq + Hash + Clone + Display + AsRef<[u8]>,
  V: Clone,
{
  fn default() -> Self { Self::new() }
}
