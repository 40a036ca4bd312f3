//! Lock-free multi-producer/multi-consumer FIFO queue.
//!
//! A Michael–Scott queue: a singly-linked list with a permanent dummy
//! node at the head, CAS at both ends, and no blocking anywhere — a
//! stalled thread can delay its own operation but never another
//! thread's. Progress is lock-free, not wait-free: a CAS that loses
//! simply retries.
//!
//! # Node lifecycle
//!
//! ```text
//! Unlinked ──enqueue CAS──▶ Linked ──dequeue CAS──▶ Retired ──ring wrap──▶ Freed
//! ```
//!
//! The dequeue CAS only *logically* removes a node; the physical free
//! is deferred through the per-thread retirement ring (see
//! [`super::retire`]), because a concurrent dequeuer may have loaded
//! the node's address just before losing the race and will still read
//! its `next` pointer on the retry. Freeing through the ring keeps the
//! node's memory valid for at least [`super::retire::RING_SLOTS`]
//! further retirements on the freeing thread, which bounds the unsafe
//! window. This deferral is a correctness requirement, not a tuning
//! knob.

use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize};

use crate::ordering::{CAS_ERR, CAS_OK, COUNT_ORD, READ_ORD};
use crate::queue::WorkQueue;
use crate::queue::retire::retire;

/// A queue link. `item` is written once at enqueue and moved out when
/// the node's successor-dequeue promotes it to dummy; `MaybeUninit`
/// keeps the dummy state (no live item) representable without a drop
/// obligation.
struct Link<T> {
    next: AtomicPtr<Link<T>>,
    item: MaybeUninit<T>,
}

impl<T> Link<T> {
    fn dummy() -> *mut Self {
        Box::into_raw(Box::new(Self {
            next: AtomicPtr::new(ptr::null_mut()),
            item: MaybeUninit::uninit(),
        }))
    }

    fn carrying(item: T) -> *mut Self {
        Box::into_raw(Box::new(Self {
            next: AtomicPtr::new(ptr::null_mut()),
            item: MaybeUninit::new(item),
        }))
    }
}

/// Release a retired link's allocation. Its item was moved out when
/// the link was unlinked, so only memory is freed here.
unsafe fn free_link<T>(ptr: *mut ()) {
    // SAFETY: `ptr` came from `Box::into_raw` in `Link::dummy` or
    // `Link::carrying` and was retired exactly once after unlinking.
    unsafe { drop(Box::from_raw(ptr.cast::<Link<T>>())) };
}

// ============================================================================
//  LockFreeQueue
// ============================================================================

/// Unbounded multi-producer/multi-consumer FIFO queue.
///
/// All operations take `&self`; clone-free sharing across threads works
/// through `Arc<LockFreeQueue<T>>` or scoped threads.
///
/// # Examples
///
/// ```
/// use grove::{LockFreeQueue, WorkQueue};
///
/// let queue = LockFreeQueue::new();
/// queue.enqueue(7u64);
/// queue.enqueue(8);
/// assert_eq!(queue.dequeue(), Some(7));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct LockFreeQueue<T> {
    head: AtomicPtr<Link<T>>,
    tail: AtomicPtr<Link<T>>,
    len: AtomicUsize,
    _owns: PhantomData<T>,
}

// SAFETY: items cross threads through the queue, so `T: Send` is
// required and sufficient; the queue itself holds no thread-affine
// state.
unsafe impl<T: Send> Send for LockFreeQueue<T> {}
unsafe impl<T: Send> Sync for LockFreeQueue<T> {}

impl<T> LockFreeQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let dummy = Link::dummy();
        Self {
            head: AtomicPtr::new(dummy),
            tail: AtomicPtr::new(dummy),
            len: AtomicUsize::new(0),
            _owns: PhantomData,
        }
    }

    fn push(&self, item: T) {
        let node = Link::carrying(item);
        loop {
            let tail = self.tail.load(READ_ORD);
            // SAFETY: `tail` stays allocated: it is reachable from the
            // queue or at worst parked in a retirement ring, and the
            // ring's window covers this loop iteration.
            let next = unsafe { (*tail).next.load(READ_ORD) };
            if tail != self.tail.load(READ_ORD) {
                continue;
            }
            if next.is_null() {
                // Tail really is last: try to link the new node.
                // SAFETY: as above for `tail`.
                if unsafe { &(*tail).next }
                    .compare_exchange(ptr::null_mut(), node, CAS_OK, CAS_ERR)
                    .is_ok()
                {
                    // Swing the tail; a loser here is fine, some other
                    // thread's help already moved it.
                    let _ = self.tail.compare_exchange(tail, node, CAS_OK, CAS_ERR);
                    self.len.fetch_add(1, COUNT_ORD);
                    return;
                }
            } else {
                // Tail lagged behind; help it forward and retry.
                let _ = self.tail.compare_exchange(tail, next, CAS_OK, CAS_ERR);
            }
        }
    }

    fn pop(&self) -> Option<T> {
        loop {
            let head = self.head.load(READ_ORD);
            let tail = self.tail.load(READ_ORD);
            // SAFETY: `head` is reachable or ring-parked; see `push`.
            let next = unsafe { (*head).next.load(READ_ORD) };
            if head != self.head.load(READ_ORD) {
                continue;
            }
            if next.is_null() {
                // Dummy with no successor: the queue is empty. Not an
                // error, just nothing to hand out.
                return None;
            }
            if head == tail {
                // Non-empty but the tail still points at the dummy;
                // help the lagging enqueuer before consuming.
                let _ = self.tail.compare_exchange(tail, next, CAS_OK, CAS_ERR);
                continue;
            }
            if self
                .head
                .compare_exchange(head, next, CAS_OK, CAS_ERR)
                .is_ok()
            {
                // We won `next`: it is the new dummy and its item is
                // ours alone.
                // SAFETY: only the winning CAS reads this item, and
                // `next` stays allocated for at least a full ring
                // window even if another thread retires it right away.
                let item = unsafe { (*next).item.assume_init_read() };
                self.len.fetch_sub(1, COUNT_ORD);
                // Old dummy: Linked -> Retired. Freed after the ring
                // wraps on this thread.
                // SAFETY: `head` is unlinked and handed over once.
                unsafe { retire(head.cast::<()>(), free_link::<T>) };
                return Some(item);
            }
        }
    }
}

impl<T> Default for LockFreeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> for LockFreeQueue<T> {
    fn enqueue(&self, item: T) {
        self.push(item);
    }

    fn dequeue(&self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.len.load(COUNT_ORD)
    }
}

impl<T> Drop for LockFreeQueue<T> {
    fn drop(&mut self) {
        // `&mut self`: no other thread can touch the chain. The first
        // link is the dummy (item already moved out or never written);
        // every later link still carries a live item.
        let mut node = *self.head.get_mut();
        let mut is_dummy = true;
        while !node.is_null() {
            // SAFETY: the chain is uniquely owned here; each link came
            // from `Box::into_raw` and is freed exactly once.
            unsafe {
                let next = *(*node).next.get_mut();
                if !is_dummy {
                    (*node).item.assume_init_drop();
                }
                drop(Box::from_raw(node));
                node = next;
            }
            is_dummy = false;
        }
    }
}

// ============================================================================
//  Tests
// ============================================================================
