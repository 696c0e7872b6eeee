//! Behavioural tests for `ShardedStore` and `LockStripes`.

use std::{
  collections::HashSet,
  sync::atomic::{AtomicUsize, Ordering},
};

use uuid::Uuid;

use crate::{Error, LockStripes, ShardedStore};

fn store() -> ShardedStore<Uuid, String> { ShardedStore::new() }

// ─── Single-key operations ───────────────────────────────────────────────────

#[test]
fn create_then_get_returns_value() {
  let s = store();
  let ids: Vec<Uuid> = (0..64).map(|_| Uuid::new_v4()).collect();
  for (i, id) in ids.iter().enumerate() {
    s.create(*id, format!("value-{i}")).unwrap();
  }
  for (i, id) in ids.iter().enumerate() {
    assert_eq!(s.get(id).unwrap(), format!("value-{i}"));
  }
  assert_eq!(s.len(), 64);
}

#[test]
fn duplicate_create_fails_and_keeps_original() {
  let s = store();
  let id = Uuid::new_v4();
  s.create(id, "first".into()).unwrap();

  let err = s.create(id, "second".into()).unwrap_err();
  assert!(err.is_already_exists());
  assert_eq!(s.get(&id).unwrap(), "first");
  assert_eq!(s.len(), 1);
}

#[test]
fn missing_key_operations_report_not_found() {
  let s = store();
  let id = Uuid::new_v4();
  assert!(matches!(s.get(&id), Err(Error::NotFound(_))));
  assert!(matches!(s.update(id, "x".into()), Err(Error::NotFound(_))));
  assert!(matches!(s.delete(&id), Err(Error::NotFound(_))));
  assert!(s.modify(&id, |_| Ok::<(), ()>(())).unwrap_err().is_not_found());
  assert!(s.is_empty());
}

#[test]
fn update_replaces_value() {
  let s = store();
  let id = Uuid::new_v4();
  s.create(id, "old".into()).unwrap();
  s.update(id, "new".into()).unwrap();
  assert_eq!(s.get(&id).unwrap(), "new");
}

#[test]
fn modify_commits_only_on_success() {
  let s = store();
  let id = Uuid::new_v4();
  s.create(id, "base".into()).unwrap();

  let merged = s
    .modify(&id, |v| {
      v.push_str("+ok");
      Ok::<_, &str>(())
    })
    .unwrap()
    .unwrap();
  assert_eq!(merged, "base+ok");

  let rejected = s
    .modify(&id, |v| {
      v.push_str("+discarded");
      Err("rejected")
    })
    .unwrap();
  assert_eq!(rejected, Err("rejected"));
  assert_eq!(s.get(&id).unwrap(), "base+ok");
}

#[test]
fn delete_removes_and_second_delete_fails() {
  let s = store();
  let id = Uuid::new_v4();
  s.create(id, "gone".into()).unwrap();
  assert_eq!(s.delete(&id).unwrap(), "gone");
  assert!(!s.contains(&id));
  assert!(s.delete(&id).unwrap_err().is_not_found());
}

// ─── Partitioning ────────────────────────────────────────────────────────────

#[test]
fn partition_of_is_stable_and_in_range() {
  let s = store();
  assert_eq!(s.partition_count(), 16);
  for _ in 0..1_000 {
    let id = Uuid::new_v4();
    let p = s.partition_of(&id);
    assert!(p < 16);
    assert_eq!(p, s.partition_of(&id));
  }
}

#[test]
fn keys_land_in_exactly_one_partition() {
  let s: ShardedStore<Uuid, u32> = ShardedStore::with_partitions(7);
  for i in 0..700 {
    s.create(Uuid::new_v4(), i).unwrap();
  }
  let sizes = s.partition_sizes();
  assert_eq!(sizes.len(), 7);
  assert_eq!(sizes.iter().sum::<usize>(), 700);
  assert_eq!(s.list().len(), 700);
}

#[test]
fn zero_partitions_is_clamped() {
  let s: ShardedStore<Uuid, u32> = ShardedStore::with_partitions(0);
  assert_eq!(s.partition_count(), 1);
  let id = Uuid::new_v4();
  s.create(id, 1).unwrap();
  assert_eq!(s.partition_of(&id), 0);
}

#[test]
fn list_where_filters() {
  let s: ShardedStore<Uuid, u32> = ShardedStore::new();
  for i in 0..100 {
    s.create(Uuid::new_v4(), i).unwrap();
  }
  let evens = s.list_where(|v| v % 2 == 0);
  assert_eq!(evens.len(), 50);
  assert!(evens.iter().all(|v| v % 2 == 0));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[test]
fn concurrent_inserts_are_all_listed() {
  let s: ShardedStore<Uuid, Uuid> = ShardedStore::new();
  let shared = &s;
  let inserted: Vec<Vec<Uuid>> = std::thread::scope(|scope| {
    let handles: Vec<_> = (0..8)
      .map(|_| {
        scope.spawn(move || {
          let s = shared;
          let mut mine = Vec::new();
          for _ in 0..250 {
            let id = Uuid::new_v4();
            s.create(id, id).unwrap();
            mine.push(id);
            // Interleave scans with inserts.
            let _ = s.list();
          }
          mine
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  let expected: HashSet<Uuid> = inserted.into_iter().flatten().collect();
  let listed: HashSet<Uuid> = s.list().into_iter().collect();
  assert_eq!(expected.len(), 2_000);
  assert_eq!(listed, expected);
}

#[test]
fn concurrent_create_same_key_has_one_winner() {
  let s: ShardedStore<Uuid, usize> = ShardedStore::new();
  let id = Uuid::new_v4();
  let winners = AtomicUsize::new(0);

  std::thread::scope(|scope| {
    for t in 0..16 {
      let s = &s;
      let winners = &winners;
      scope.spawn(move || {
        if s.create(id, t).is_ok() {
          winners.fetch_add(1, Ordering::SeqCst);
        }
      });
    }
  });

  assert_eq!(winners.load(Ordering::SeqCst), 1);
  assert_eq!(s.len(), 1);
}

#[test]
fn concurrent_modify_loses_no_increments() {
  let s: ShardedStore<Uuid, u64> = ShardedStore::new();
  let id = Uuid::new_v4();
  s.create(id, 0).unwrap();

  std::thread::scope(|scope| {
    for _ in 0..8 {
      scope.spawn(|| {
        for _ in 0..500 {
          s.modify(&id, |v| {
            *v += 1;
            Ok::<_, ()>(())
          })
          .unwrap()
          .unwrap();
        }
      });
    }
  });

  assert_eq!(s.get(&id).unwrap(), 4_000);
}

// ─── Stripes ─────────────────────────────────────────────────────────────────

#[test]
fn stripes_serialise_the_same_token() {
  let stripes = LockStripes::default();
  let token = Uuid::new_v4();
  let counter = AtomicUsize::new(0);
  let max_inside = AtomicUsize::new(0);

  std::thread::scope(|scope| {
    for _ in 0..8 {
      scope.spawn(|| {
        for _ in 0..100 {
          let _guard = stripes.lock(token.as_bytes());
          let inside = counter.fetch_add(1, Ordering::SeqCst) + 1;
          max_inside.fetch_max(inside, Ordering::SeqCst);
          counter.fetch_sub(1, Ordering::SeqCst);
        }
      });
    }
  });

  assert_eq!(max_inside.load(Ordering::SeqCst), 1);
}

#[test]
fn stripe_selection_matches_partitioning() {
  let stripes = LockStripes::new(16);
  let s: ShardedStore<Uuid, ()> = ShardedStore::with_partitions(16);
  for _ in 0..200 {
    let id = Uuid::new_v4();
    assert_eq!(stripes.stripe_of(id.as_bytes()), s.partition_of(&id));
  }
}
