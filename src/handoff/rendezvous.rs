//! Rendezvous-queue handoff.
//!
//! Delegates to a generic blocking rendezvous primitive:
//! [`flume::bounded`] with zero capacity, where `send` blocks until a `recv`
//! is ready to take the value and vice versa. The primitive itself enforces
//! the no-buffering, one-in-flight invariant, so this variant adds no state
//! of its own. Cancellation is expressed as disconnection — closing drops
//! the inner receiver, and a blocked peer observes the hangup.

use super::{Closed, Term, TermReceiver, TermSender};

pub struct Sender {
    inner: flume::Sender<Term>,
}

pub struct Receiver {
    inner: Option<flume::Receiver<Term>>,
}

pub fn channel() -> (Sender, Receiver) {
    let (tx, rx) = flume::bounded(0);
    (Sender { inner: tx }, Receiver { inner: Some(rx) })
}

impl TermSender for Sender {
    fn send(&mut self, term: Term) -> Result<(), Closed> {
        self.inner.send(term).map_err(|_| Closed)
    }
}

impl TermReceiver for Receiver {
    fn recv(&mut self) -> Result<Term, Closed> {
        match &self.inner {
            Some(rx) => rx.recv().map_err(|_| Closed),
            None => Err(Closed),
        }
    }

    fn close(&mut self) {
        self.inner = None;
    }
}
