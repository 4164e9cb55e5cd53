//! No-thread baseline.
//!
//! Producer and consumer logic share one call stack: "receiving" is a direct
//! call into the generator, with no second thread and no synchronization
//! state at all. This is the floor for the cost of computing and consuming
//! terms; every real variant's overhead is measured against it.

use crate::fib::FibGen;

use super::{Closed, Term, TermReceiver};

pub struct Source {
    fib: FibGen,
}

/// Creates the degenerate channel: just the generator behind the consumer
/// interface.
pub fn source() -> Source {
    Source { fib: FibGen::new() }
}

impl TermReceiver for Source {
    fn recv(&mut self) -> Result<Term, Closed> {
        Ok(self.fib.next())
    }
}
