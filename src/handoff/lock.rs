//! Mutex + condvar handoff.
//!
//! A [`Mutex`] guards the slot and one [`Condvar`] is notified on every
//! full↔empty transition. Before steady-state traffic both sides run a
//! three-step handshake — signal, wait for the peer, signal — so that each
//! is confirmed past thread startup and inside the critical section before
//! the timed region begins. The trailing signal is redundant with the
//! predicate loops but keeps the alternation symmetric; the wake itself is
//! part of what gets measured.
//!
//! Every wait re-checks its predicate in a loop, so a wake that is not yet
//! actionable is tolerated as a no-op.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{Closed, Term, TermReceiver, TermSender};

struct State {
    item: Option<Term>,
    closed: bool,
    producer_in: bool,
    consumer_in: bool,
}

struct Shared {
    state: Mutex<State>,
    cond: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn close(&self) {
        let mut st = self.lock();
        st.closed = true;
        self.cond.notify_all();
    }

    /// signal → wait for the peer's flag → signal
    fn handshake(&self, set: fn(&mut State), peer_in: fn(&State) -> bool) {
        let mut st = self.lock();
        set(&mut st);
        self.cond.notify_one();
        while !peer_in(&st) && !st.closed {
            st = self.cond.wait(st).unwrap();
        }
        self.cond.notify_one();
    }
}

pub struct Sender {
    shared: Arc<Shared>,
}

pub struct Receiver {
    shared: Arc<Shared>,
}

/// Creates a connected pair. Both halves must run
/// [`handshake`](TermSender::handshake) before steady-state `send`/`recv`.
pub fn channel() -> (Sender, Receiver) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            item: None,
            closed: false,
            producer_in: false,
            consumer_in: false,
        }),
        cond: Condvar::new(),
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
        let mut st = self.shared.lock();
        loop {
            if st.closed {
                return Err(Closed);
            }
            if st.item.is_none() {
                break;
            }
            st = self.shared.cond.wait(st).unwrap();
        }
        st.item = Some(term);
        self.shared.cond.notify_one();
        Ok(())
    }

    fn handshake(&mut self) {
        self.shared
            .handshake(|st| st.producer_in = true, |st| st.consumer_in);
    }
}

impl Drop for Sender {
    fn drop(&mut self) {
        self.shared.close();
    }
}

impl TermReceiver for Receiver {
    fn recv(&mut self) -> Result<Term, Closed> {
        let mut st = self.shared.lock();
        loop {
            if let Some(term) = st.item.take() {
                self.shared.cond.notify_one();
                return Ok(term);
            }
            if st.closed {
                return Err(Closed);
            }
            st = self.shared.cond.wait(st).unwrap();
        }
    }

    fn handshake(&mut self) {
        self.shared
            .handshake(|st| st.consumer_in = true, |st| st.producer_in);
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
