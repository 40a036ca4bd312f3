//! # `grove`
//!
//! An ordered key→value B+tree with copy-on-write snapshots, linear-time
//! set algebra over snapshots, and thread-safe work queues.
//!
//! The tree is the in-process index structure: a directory-style server
//! keeps one writer per tree and hands read-only [`Tree::snapshot`]s to
//! concurrent readers for free — cloning shares every node and the
//! first mutation copies only the path it touches. The queues carry
//! maintenance work between threads without touching the tree's own
//! synchronization story.
//!
//! | Piece | Entry points |
//! |-------|--------------|
//! | Ordered COW map | [`Tree`]: `insert`, `get`, `remove`, `load`, `iter`, `cursor`, `snapshot` |
//! | Set algebra | [`Tree::union`], [`Tree::intersection`], [`Tree::difference`], [`Tree::symmetric_difference`], [`Tree::filter`] |
//! | Verification | [`Tree::verify`], [`StructureError`] |
//! | Work queues | [`WorkQueue`], [`MutexQueue`], [`LockFreeQueue`] |
//!
//! # Example
//!
//! ```
//! use grove::Tree;
//!
//! let mut index: Tree<u64, String> = Tree::new();
//! index.insert(10, "alpha".into());
//! index.insert(20, "beta".into());
//!
//! // O(1) snapshot: readers keep this view while the writer moves on.
//! let view = index.snapshot();
//! index.remove(&10);
//!
//! assert_eq!(view.get(&10).map(String::as_str), Some("alpha"));
//! assert_eq!(index.get(&10), None);
//!
//! // Set algebra builds new trees from snapshots.
//! let evens = view.filter(|k, _| k % 2 == 0);
//! assert_eq!(evens.len(), 2);
//! ```
//!
//! # Concurrency model
//!
//! A [`Tree`] handle is a single-writer structure: mutation takes
//! `&mut self`. Snapshots are immutable-by-sharing, so any number of
//! threads may read distinct snapshots without locks. The queues are
//! the only structures built for uncoordinated concurrent access.
//!
//! # Feature flags
//!
//! - `tracing` (off by default): emit `tracing` events for structural
//!   changes (splits, merges, root growth, queue retirement).

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod node;
mod ordering;
mod set;
mod trace_shim;

pub mod queue;
pub mod tree;

pub use error::StructureError;
pub use queue::{LockFreeQueue, MutexQueue, WorkQueue};
pub use tree::{Cursor, Direction, Iter, Tree};
