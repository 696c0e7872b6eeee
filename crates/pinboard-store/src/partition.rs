//! Partition selection.
//!
//! Keys are routed with 32-bit FNV-1a over their raw bytes. The function is
//! fixed so the same key lands in the same partition for the lifetime of the
//! process, independent of `std`'s randomised hasher seeds.

/// Partition count used by [`crate::ShardedStore::new`].
pub const DEFAULT_PARTITIONS: usize = 16;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
pub fn fnv1a32(bytes: &[u8]) -> u32 {
  bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
    (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
  })
}

/// The partition owning `bytes` in a store of `partitions` partitions.
///
/// `partitions` must be non-zero.
pub fn partition_index(bytes: &[u8], partitions: usize) -> usize {
  fnv1a32(bytes) as usize % partitions
}
