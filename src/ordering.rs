//! Named memory orderings for the lock-free queue.
//!
//! Every atomic access in the queue goes through one of these constants
//! so the pairing between loads and stores is visible at each call site.

use std::sync::atomic::Ordering;

/// Ordering for loading `head`, `tail`, or a node's `next` pointer
/// during a CAS retry loop. Pairs with [`CAS_OK`] stores by other
/// threads: a loaded node's contents are fully visible.
pub(crate) const READ_ORD: Ordering = Ordering::Acquire;

/// Ordering for a successful compare-and-swap on `head`, `tail`, or a
/// `next` pointer. Release publishes the node's contents; Acquire makes
/// the previous owner's writes visible.
pub(crate) const CAS_OK: Ordering = Ordering::AcqRel;

/// Ordering for a failed compare-and-swap. The retry loop only needs to
/// observe the current value.
pub(crate) const CAS_ERR: Ordering = Ordering::Acquire;

/// Ordering for the element counter. The counter is a statistic with no
/// synchronizing role; the linked list itself carries the data.
pub(crate) const COUNT_ORD: Ordering = Ordering::Relaxed;
