//! Per-thread deferred reclamation for unlinked queue nodes.
//!
//! A node CAS'd out of the lock-free queue cannot be freed on the spot:
//! another thread in its own retry loop may have loaded the pointer
//! just before the CAS and still dereference it. Instead the unlinking
//! thread parks the node in a fixed-size thread-local ring and frees
//! the oldest entry only when the ring wraps — that is, only after
//! [`RING_SLOTS`] further retirements have happened on the same thread.
//! The window between unlink and free is therefore always at least
//! [`RING_SLOTS`] retirements wide, which outlasts any in-flight loop
//! iteration on the other threads.
//!
//! The ring drains when its thread exits. This is deferred reclamation,
//! not garbage collection: nothing here scans, and a quiet thread
//! simply keeps up to [`RING_SLOTS`] dead nodes parked.

use std::cell::RefCell;

use crate::trace_shim::trace_log;

/// Retired nodes a thread keeps parked before the oldest is freed.
pub(crate) const RING_SLOTS: usize = 32;

/// A node awaiting its deferred free, type-erased so one ring serves
/// queues of every item type.
struct Retired {
    ptr: *mut (),
    free: unsafe fn(*mut ()),
}

struct RetireRing {
    slots: [Option<Retired>; RING_SLOTS],
    /// Next slot to overwrite; the entry evicted from it is the oldest.
    next: usize,
}

impl RetireRing {
    const fn new() -> Self {
        Self {
            slots: [const { None }; RING_SLOTS],
            next: 0,
        }
    }

    fn park(&mut self, ptr: *mut (), free: unsafe fn(*mut ())) {
        if let Some(oldest) = self.slots[self.next].replace(Retired { ptr, free }) {
            // RING_SLOTS retirements have passed on this thread since
            // `oldest` was unlinked; no retry loop can still hold it.
            trace_log!("retire ring wrapped; freeing oldest node");
            // SAFETY: the caller of `retire` guaranteed `oldest.ptr`
            // was unlinked and handed over exactly once.
            unsafe { (oldest.free)(oldest.ptr) };
        }
        self.next = (self.next + 1) % RING_SLOTS;
    }
}

impl Drop for RetireRing {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            if let Some(parked) = slot.take() {
                // SAFETY: same handover contract as in `park`; the
                // thread is exiting, so its parked nodes are due.
                unsafe { (parked.free)(parked.ptr) };
            }
        }
    }
}

thread_local! {
    static RING: RefCell<RetireRing> = const { RefCell::new(RetireRing::new()) };
}

/// Park an unlinked node for deferred freeing on the current thread.
///
/// # Safety
///
/// - `ptr` must have been unlinked from its queue and passed here
///   exactly once; `free` must release it.
/// - `free` must stay callable for the life of the process (a plain
///   monomorphized function, not a closure over borrowed state).
pub(crate) unsafe fn retire(ptr: *mut (), free: unsafe fn(*mut ())) {
    let parked = RING.try_with(|ring| ring.borrow_mut().park(ptr, free));
    if parked.is_err() {
        // The thread-local has already been torn down: this thread is
        // exiting and runs no more retry loops, while other threads
        // still get the full ring window from their own rings.
        // SAFETY: handover contract is on our caller.
        unsafe { free(ptr) };
    }
}

// ============================================================================
//  Tests
// ============================================================================
