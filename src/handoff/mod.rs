//! Single-slot handoff channels between one producer and one consumer.
//!
//! Every variant provides the same rendezvous contract — the producer is
//! never more than one term ahead, the consumer never sees a duplicated,
//! dropped or stale term — while waiting for the other side in a
//! fundamentally different way:
//!
//! - [`lock`] — mutex + condvar, with a start handshake
//! - [`park`] — direct thread-targeted park/unpark
//! - [`spin`] — busy-spin on an atomic phase flag
//! - [`rendezvous`] — delegation to a zero-capacity blocking queue
//! - [`baseline`] — no thread at all; the floor for generation cost
//!
//! Each module exposes `channel() -> (Sender, Receiver)` (the baseline,
//! having no producer side, exposes `source()`). The halves are strictly
//! single-owner: one thread sends, one thread receives.

pub mod baseline;
pub mod lock;
pub mod park;
pub mod rendezvous;
mod slot;
pub mod spin;

pub use crate::fib::Term;

/// The peer is gone or the channel was cancelled.
///
/// For a producer this is the cooperative shutdown signal, observed at the
/// next wait point; it is not a failure.
#[derive(Debug, PartialEq, Eq)]
pub struct Closed;

impl std::fmt::Display for Closed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "handoff channel closed")
    }
}

/// Producer half of a handoff channel.
pub trait TermSender {
    /// Blocks until the slot is empty, publishes `term` and wakes a waiting
    /// consumer. Returns [`Closed`] once the channel is cancelled.
    fn send(&mut self, term: Term) -> Result<(), Closed>;

    /// One-time synchronization with the peer before steady-state traffic.
    /// A no-op for every variant without a start handshake.
    fn handshake(&mut self) {}
}

/// Consumer half of a handoff channel.
pub trait TermReceiver {
    /// Blocks until the slot is full, drains it and wakes a waiting
    /// producer. Returns [`Closed`] if the producer is gone and no term is
    /// pending.
    fn recv(&mut self) -> Result<Term, Closed>;

    /// One-time synchronization with the peer before steady-state traffic.
    fn handshake(&mut self) {}

    /// Cancels the channel: a peer blocked in `send` is woken and observes
    /// [`Closed`]. Idempotent.
    fn close(&mut self) {}
}
