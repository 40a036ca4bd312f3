//! Thread-safe work hand-off queues.
//!
//! Two interchangeable FIFO implementations behind one contract:
//!
//! - [`MutexQueue`] — a ring buffer behind a single mutex. Simple,
//!   predictable, blocks only for the duration of the splice.
//! - [`LockFreeQueue`] — a multi-producer/multi-consumer linked queue
//!   that never blocks, with deferred node reclamation through a
//!   per-thread retirement ring.
//!
//! Both preserve FIFO order per producer under arbitrary interleaving,
//! and both return `None` from an empty [`dequeue`](WorkQueue::dequeue)
//! rather than blocking. Items still queued when a queue is dropped are
//! released through their own `Drop`.

use std::collections::VecDeque;

use parking_lot::Mutex;

mod lockfree;
mod retire;

pub use lockfree::LockFreeQueue;

// ============================================================================
//  Contract
// ============================================================================

/// The queue contract shared by both implementations.
pub trait WorkQueue<T> {
    /// Append an item at the tail.
    fn enqueue(&self, item: T);

    /// Detach and return the head item, or `None` if the queue is
    /// empty. Never blocks on emptiness.
    fn dequeue(&self) -> Option<T>;

    /// Number of queued items.
    fn len(&self) -> usize;

    /// `true` if no items are queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
//  MutexQueue
// ============================================================================

/// FIFO queue guarded by a single mutex.
///
/// The critical section is one `VecDeque` splice, so contention windows
/// are short; for uncontended hand-off this is usually the faster of
/// the two implementations.
///
/// # Examples
///
/// ```
/// use grove::{MutexQueue, WorkQueue};
///
/// let queue = MutexQueue::new();
/// queue.enqueue("job");
/// assert_eq!(queue.dequeue(), Some("job"));
/// assert_eq!(queue.dequeue(), None);
/// ```
#[derive(Debug)]
pub struct MutexQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Default for MutexQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MutexQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> WorkQueue<T> for MutexQueue<T> {
    fn enqueue(&self, item: T) {
        self.items.lock().push_back(item);
    }

    fn dequeue(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    fn len(&self) -> usize {
        self.items.lock().len()
    }
}

// ============================================================================
//  Tests
// ============================================================================
