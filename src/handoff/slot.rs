use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crossbeam_utils::CachePadded;

use crate::fib::Term;

/// The single slot shared by the lock-free variants: one term plus a binary
/// phase flag.
///
/// Protocol (strict SPSC):
/// - Producer: observe [`is_full`](Self::is_full) false, then [`publish`](Self::publish)
/// - Consumer: observe [`is_full`](Self::is_full) true, then [`take`](Self::take)
///
/// `publish` stores the value Relaxed and flips the flag with Release;
/// `is_full` loads the flag with Acquire, so a consumer that sees the slot
/// full also sees the value, and a producer that sees it empty again may
/// overwrite. No value is ever written while the flag is up or read while it
/// is down.
pub(crate) struct AtomicSlot {
    value: CachePadded<AtomicI64>,
    full: CachePadded<AtomicBool>,
}

impl AtomicSlot {
    pub(crate) fn new() -> Self {
        Self {
            value: CachePadded::new(AtomicI64::new(0)),
            full: CachePadded::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.full.load(Ordering::Acquire)
    }

    /// Publishes a term. Caller must be the producer and must have observed
    /// the slot empty since the last publish.
    #[inline]
    pub(crate) fn publish(&self, term: Term) {
        self.value.store(term, Ordering::Relaxed);
        self.full.store(true, Ordering::Release);
    }

    /// Drains the slot. Caller must be the consumer and must have observed
    /// the slot full since the last take.
    #[inline]
    pub(crate) fn take(&self) -> Term {
        let term = self.value.load(Ordering::Relaxed);
        self.full.store(false, Ordering::Release);
        term
    }
}
