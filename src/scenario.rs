//! Benchmark scenario lifecycle.
//!
//! One [`Scenario`] is one timed invocation: [`start`](Scenario::start)
//! builds a fresh generator and channel and launches the producer
//! ([`Ready`]), the timed operations consume terms ([`Running`]), and
//! [`stop`](Scenario::stop) cancels the channel and joins the producer
//! ([`Draining`] → [`Stopped`]). Nothing survives across invocations, so a
//! measurement never sees residual contention or stale wakes from a
//! previous run.
//!
//! [`Ready`]: Scenario::start
//! [`Running`]: Scenario::consume_n
//! [`Draining`]: Scenario::stop
//! [`Stopped`]: Scenario::stop

use std::env;
use std::time::Duration;

use crate::exec::{self, ExecMode, JoinError, Task};
use crate::fib::{FibGen, Term};
use crate::handoff::{Closed, TermReceiver, TermSender, baseline};

/// How long teardown waits for the producer before declaring it stuck.
pub const JOIN_DEADLINE: Duration = Duration::from_secs(5);

/// Per-invocation configuration: thread-execution strategy and the scale
/// factor applied to a driver's base iteration count. Immutable for the
/// duration of one timed invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub exec: ExecMode,
    pub scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exec: ExecMode::Os,
            scale: 1.0,
        }
    }
}

impl Config {
    /// Reads `STAFFETTA_EXEC` (`os` | `pooled`) and `STAFFETTA_SCALE`
    /// (a float applied to base iteration counts), so run length and thread
    /// model can change without recompiling.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(exec) = env::var("STAFFETTA_EXEC") {
            cfg.exec = parse_exec(&exec);
        }
        if let Ok(scale) = env::var("STAFFETTA_SCALE") {
            cfg.scale = scale
                .parse()
                .unwrap_or_else(|_| panic!("STAFFETTA_SCALE must be a float, got {scale:?}"));
        }
        cfg
    }

    /// Applies the scale factor to a base iteration count.
    pub fn scaled(&self, base: u64) -> u64 {
        (base as f64 * self.scale as f64) as u64
    }
}

fn parse_exec(value: &str) -> ExecMode {
    match value.to_ascii_lowercase().as_str() {
        "os" => ExecMode::Os,
        "pooled" | "pool" => ExecMode::Pooled,
        other => panic!("STAFFETTA_EXEC must be 'os' or 'pooled', got {other:?}"),
    }
}

/// Teardown failed to quiesce the producer.
#[derive(Debug, PartialEq, Eq)]
pub enum StopError {
    /// The producer never observed cancellation — a wake or cancellation bug
    /// in the channel variant under test. The run must not continue.
    Stuck,
    /// The producer panicked.
    Panicked,
}

impl std::fmt::Display for StopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopError::Stuck => write!(f, "producer still running after cancellation"),
            StopError::Panicked => write!(f, "producer panicked"),
        }
    }
}

impl std::error::Error for StopError {}

/// One timed invocation: a fresh generator and channel, and (except for the
/// baseline) a producer running on the configured thread model.
pub struct Scenario<R: TermReceiver> {
    rx: R,
    producer: Option<Task>,
}

impl<R: TermReceiver> Scenario<R> {
    /// Setup: spawns the producer over the sender half, then completes the
    /// channel's start handshake. On return both sides are past thread
    /// startup, so the timed region measures handoffs, not spawning.
    pub fn start<S>(mode: ExecMode, (mut tx, mut rx): (S, R)) -> Self
    where
        S: TermSender + Send + 'static,
    {
        let producer = exec::spawn(mode, move || {
            tx.handshake();
            let mut fib = FibGen::new();
            while tx.send(fib.next()).is_ok() {}
        });
        rx.handshake();
        Self {
            rx,
            producer: Some(producer),
        }
    }

    /// Timed operation: one handoff.
    pub fn consume_one(&mut self) -> Result<Term, Closed> {
        self.rx.recv()
    }

    /// Timed operation: `n` handoffs, returning the wrapping sum of the
    /// received terms for checksum purposes. `n = 0` performs no handoff
    /// and returns 0.
    pub fn consume_n(&mut self, n: u64) -> Result<Term, Closed> {
        let mut sum: Term = 0;
        for _ in 0..n {
            sum = sum.wrapping_add(self.rx.recv()?);
        }
        Ok(sum)
    }

    /// Teardown: requests cancellation and joins the producer. Does not
    /// return Ok until the producer has actually exited; a producer that
    /// outlives [`JOIN_DEADLINE`] is reported as [`StopError::Stuck`].
    pub fn stop(mut self) -> Result<(), StopError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), StopError> {
        self.rx.close();
        match self.producer.take() {
            Some(task) => task.join(JOIN_DEADLINE).map_err(|err| match err {
                JoinError::Timeout => StopError::Stuck,
                JoinError::Panicked => StopError::Panicked,
            }),
            None => Ok(()),
        }
    }
}

impl Scenario<baseline::Source> {
    /// The no-thread baseline scenario: no producer to start or stop.
    pub fn direct() -> Self {
        Self {
            rx: baseline::source(),
            producer: None,
        }
    }
}

impl<R: TermReceiver> Drop for Scenario<R> {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
