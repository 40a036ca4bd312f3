//! Snapshot isolation tests.
//!
//! A snapshot must keep yielding exactly the entries it was taken with,
//! whatever happens to the handle it was cloned from — and vice versa.

mod common;

use std::collections::BTreeMap;

use grove::{Direction, Tree};

type T = Tree<u32, String, 4>;

fn filled(n: u32) -> T {
    (0..n).map(|k| (k, format!("value-{k:04}"))).collect()
}

fn capture(tree: &T) -> Vec<(u32, String)> {
    tree.iter().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn snapshot_survives_writer_churn() {
    common::init_tracing();
    let mut tree = filled(500);
    let frozen = tree.snapshot();
    let before = capture(&frozen);

    // Heavy churn through the writer handle: overwrite, delete, insert.
    for k in 0..500 {
        tree.insert(k, "overwritten".to_owned());
    }
    for k in (0..500).step_by(3) {
        tree.remove(&k);
    }
    for k in 1000..1200 {
        tree.insert(k, "late".to_owned());
    }
    tree.verify().unwrap();

    // The snapshot is byte-identical to its capture.
    assert_eq!(capture(&frozen), before);
    frozen.verify().unwrap();
    for (k, v) in &before {
        assert_eq!(frozen.get(k), Some(v));
    }
    assert_eq!(frozen.get(&1000), None);
}

#[test]
fn mutating_the_clone_leaves_the_original_alone() {
    common::init_tracing();
    let original = filled(200);
    let before = capture(&original);

    let mut clone = original.snapshot();
    for k in 0..200 {
        if k % 2 == 0 {
            clone.remove(&k);
        } else {
            clone.insert(k, "patched".to_owned());
        }
    }
    clone.verify().unwrap();
    assert_eq!(clone.len(), 100);

    assert_eq!(capture(&original), before);
    original.verify().unwrap();
}

#[test]
fn chained_snapshots_diverge_independently() {
    common::init_tracing();
    let mut generations: Vec<T> = Vec::new();
    let mut tree = T::new();
    for generation in 0..10u32 {
        for k in generation * 20..(generation + 1) * 20 {
            tree.insert(k, format!("gen-{generation}"));
        }
        generations.push(tree.snapshot());
    }

    // Each generation sees exactly its own prefix.
    for (generation, snap) in generations.iter().enumerate() {
        let expected = (generation as u32 + 1) * 20;
        assert_eq!(snap.len(), expected as usize);
        assert_eq!(snap.last_key_value().map(|(k, _)| *k), Some(expected - 1));
        snap.verify().unwrap();
    }

    // Dropping newer generations must not disturb older ones.
    while let Some(snap) = generations.pop() {
        snap.verify().unwrap();
        drop(snap);
        if let Some(oldest) = generations.first() {
            assert_eq!(oldest.len(), 20);
            assert_eq!(oldest.get(&0), Some(&"gen-0".to_owned()));
        }
    }
}

#[test]
fn cursor_pins_its_snapshot() {
    let mut tree = filled(100);
    let mut cursor = tree.cursor(Some(&90), Direction::Forward);
    // Delete the exact range the cursor is about to walk.
    for k in 90..100 {
        tree.remove(&k);
    }
    drop(tree);

    let walked: Vec<u32> = std::iter::from_fn(|| cursor.next_entry().map(|(k, _)| k)).collect();
    assert_eq!(walked, (90..100).collect::<Vec<u32>>());
}

#[test]
fn snapshots_agree_with_an_oracle_fork() {
    common::init_tracing();
    let mut tree: Tree<u16, u64, 4> = Tree::new();
    let mut oracle: BTreeMap<u16, u64> = BTreeMap::new();
    let mut rng = common::XorShift::new(0x5eed);

    for _ in 0..500 {
        let k = (rng.next_u64() % 300) as u16;
        let v = rng.next_u64();
        tree.insert(k, v);
        oracle.insert(k, v);
    }

    // Fork both, keep mutating both forks differently.
    let mut fork = tree.snapshot();
    let mut fork_oracle = oracle.clone();
    for _ in 0..500 {
        let k = (rng.next_u64() % 300) as u16;
        if rng.next_u64() % 2 == 0 {
            let v = rng.next_u64();
            fork.insert(k, v);
            fork_oracle.insert(k, v);
        } else {
            assert_eq!(fork.remove(&k), fork_oracle.remove(&k));
        }
        let k2 = (rng.next_u64() % 300) as u16;
        let v2 = rng.next_u64();
        tree.insert(k2, v2);
        oracle.insert(k2, v2);
    }

    tree.verify().unwrap();
    fork.verify().unwrap();
    assert!(tree.iter().map(|(k, v)| (*k, *v)).eq(oracle.into_iter()));
    assert!(fork.iter().map(|(k, v)| (*k, *v)).eq(fork_oracle.into_iter()));
}
