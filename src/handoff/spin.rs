//! Busy-spin handoff.
//!
//! No blocking primitive at all: both sides poll the slot's atomic phase
//! flag in a tight loop, staying on-CPU the whole time they are logically
//! waiting. Each poll iteration issues [`std::hint::spin_loop`] so the
//! processor can apply spin-wait optimizations, and avoids
//! `thread::yield_now`, which may enter the scheduler and deschedule the
//! thread — latency over fairness, the same trade the spinning paths of the
//! buffered channels make.
//!
//! Cross-thread visibility comes from the slot's Release/Acquire protocol;
//! the cancellation flag is polled in the same loops.

use std::hint;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crossbeam_utils::CachePadded;

use super::slot::AtomicSlot;
use super::{Closed, Term, TermReceiver, TermSender};

struct Shared {
    slot: AtomicSlot,
    closed: CachePadded<AtomicBool>,
}

pub struct Sender {
    shared: Arc<Shared>,
}

pub struct Receiver {
    shared: Arc<Shared>,
}

pub fn channel() -> (Sender, Receiver) {
    let shared = Arc::new(Shared {
        slot: AtomicSlot::new(),
        closed: CachePadded::new(AtomicBool::new(false)),
    });
    (
        Sender {
            shared: shared.clone(),
        },
        Receiver { shared },
    )
}

impl TermSender for Sender {
    fn send(&mut self, term: Term) -> Result<(), Closed> {
        loop {
            if self.shared.closed.load(Ordering::Acquire) {
                return Err(Closed);
            }
            if !self.shared.slot.is_full() {
                break;
            }
            hint::spin_loop();
        }
        self.shared.slot.publish(term);
        Ok(())
    }
}

impl Drop for Sender {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
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
            hint::spin_loop();
        }
        Ok(self.shared.slot.take())
    }

    fn close(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
    }
}

impl Drop for Receiver {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
    }
}
