//! Direct thread-targeted park/unpark handoff.
//!
//! No lock: the slot phase flag is tested directly (Release on publish,
//! Acquire on observe) and a side that finds the condition not yet true
//! parks itself with [`std::thread::park`]. The wake is an
//! [`unpark`](std::thread::Thread::unpark) aimed at the peer's captured
//! thread handle. A parked thread re-checks the condition after every
//! return — `park` may wake spuriously and an unpark token can be left over
//! from an earlier exchange, so a stray wake is a no-op that loops back to
//! parking. Cancellation is re-checked before every park and after every
//! wake.
//!
//! Thread identity is the wake address, so the halves are pinned: the
//! receiver to the thread that created the channel (it is `!Send`), the
//! sender to the thread of its first `send`.

use std::marker::PhantomData;
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, Thread};

use crossbeam_utils::CachePadded;

use super::slot::AtomicSlot;
use super::{Closed, Term, TermReceiver, TermSender};

struct Shared {
    slot: AtomicSlot,
    closed: CachePadded<AtomicBool>,
    /// Captured at `channel()`; the producer targets this on every publish.
    consumer: Thread,
    /// Set by the producer before its first publish. A consumer can only
    /// need to wake a producer it has already received from, and observing
    /// the slot full (Acquire) makes the earlier registration visible.
    producer: OnceLock<Thread>,
}

impl Shared {
    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        if let Some(producer) = self.producer.get() {
            producer.unpark();
        }
        self.consumer.unpark();
    }
}

pub struct Sender {
    shared: Arc<Shared>,
}

pub struct Receiver {
    shared: Arc<Shared>,
    /// Unpark targets the creating thread, so receiving elsewhere would wait
    /// on wakes aimed at the wrong thread.
    _pinned: PhantomData<*const ()>,
}

/// Creates a connected pair. Must be called on the thread that will receive.
pub fn channel() -> (Sender, Receiver) {
    let shared = Arc::new(Shared {
        slot: AtomicSlot::new(),
        closed: CachePadded::new(AtomicBool::new(false)),
        consumer: thread::current(),
        producer: OnceLock::new(),
    });
    (
        Sender {
            shared: shared.clone(),
        },
        Receiver {
            shared,
            _pinned: PhantomData,
        },
    )
}

impl TermSender for Sender {
    fn send(&mut self, term: Term) -> Result<(), Closed> {
        self.shared.producer.get_or_init(thread::current);
        loop {
            if self.shared.closed.load(Ordering::Acquire) {
                return Err(Closed);
            }
            if !self.shared.slot.is_full() {
                break;
            }
            thread::park();
        }
        self.shared.slot.publish(term);
        self.shared.consumer.unpark();
        Ok(())
    }
}

impl Drop for Sender {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.consumer.unpark();
    }
}

impl TermReceiver for Receiver {
    fn recv(&mut self) -> Result<Term, Closed> {
        loop {
            if self.shared.slot.is_full() {
                break;
            }
            if self.shared.closed.load(Ordering::Acquire) {
                return Err(Closed);
            }
            thread::park();
        }
        let term = self.shared.slot.take();
        if let Some(producer) = self.shared.producer.get() {
            producer.unpark();
        }
        Ok(term)
    }

    fn close(&mut self) {
        self.shared.close();
    }
}

impl Drop for Receiver {
    fn drop(&mut self) {
        self.shared.close();
    }
}
