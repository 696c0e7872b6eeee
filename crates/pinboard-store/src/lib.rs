//! Hash-partitioned in-memory storage engine for Pinboard.
//!
//! A [`ShardedStore`] splits its keyspace into a fixed number of partitions,
//! each guarded by its own reader/writer lock. Single-key operations only
//! contend with other operations on the same partition; full scans visit the
//! partitions one after another and are therefore not a global snapshot.

mod partition;
mod store;
mod stripes;

pub mod error;

pub use error::{Error, Result};
pub use partition::{DEFAULT_PARTITIONS, fnv1a32, partition_index};
pub use store::ShardedStore;
pub use stripes::LockStripes;

#[cfg(test)]
mod tests;
