//! Thread-execution strategy: how a logical producer thread is realized.
//!
//! [`ExecMode::Os`] starts a fresh OS thread per invocation. [`ExecMode::Pooled`]
//! runs the producer as a job on a small process-wide pool of reusable
//! workers, so the thread-start cost is paid once per process rather than
//! once per invocation. The choice must not change what a handoff channel
//! observes, only how much a measured invocation pays for thread startup.
//!
//! Completion is signalled through a one-shot latch, so joining works the
//! same way (and with a deadline) in both modes.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

/// Workers backing [`ExecMode::Pooled`]. One producer runs per invocation,
/// so two workers keep a spare while the previous task drains.
pub(crate) const POOL_WORKERS: usize = 2;

/// Which kind of thread a logical producer maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// A dedicated OS thread, spawned at setup and gone after teardown.
    Os,
    /// A job on the shared worker pool; the worker parks between jobs.
    Pooled,
}

/// Joining a task failed.
#[derive(Debug, PartialEq, Eq)]
pub enum JoinError {
    /// The task did not complete within the deadline.
    Timeout,
    /// The task panicked.
    Panicked,
}

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinError::Timeout => write!(f, "task did not complete within the deadline"),
            JoinError::Panicked => write!(f, "task panicked"),
        }
    }
}

impl std::error::Error for JoinError {}

/// Handle to a spawned logical thread.
///
/// The latch fires when the closure returns; if the closure panics the latch
/// sender is dropped during unwinding and the disconnection surfaces as
/// [`JoinError::Panicked`] instead.
pub struct Task {
    done: flume::Receiver<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Task {
    /// Blocks until the task completes, up to `deadline`.
    pub fn join(mut self, deadline: Duration) -> Result<(), JoinError> {
        match self.done.recv_timeout(deadline) {
            Ok(()) => {
                if let Some(handle) = self.thread.take() {
                    handle.join().map_err(|_| JoinError::Panicked)?;
                }
                Ok(())
            }
            Err(flume::RecvTimeoutError::Disconnected) => Err(JoinError::Panicked),
            Err(flume::RecvTimeoutError::Timeout) => Err(JoinError::Timeout),
        }
    }
}

/// Runs `f` as a logical thread under the given mode.
pub fn spawn(mode: ExecMode, f: impl FnOnce() + Send + 'static) -> Task {
    let (done_tx, done_rx) = flume::bounded(1);
    let job = move || {
        f();
        let _ = done_tx.send(());
    };
    match mode {
        ExecMode::Os => {
            let handle = thread::Builder::new()
                .name("staffetta-producer".into())
                .spawn(job)
                .expect("failed to spawn producer thread");
            Task {
                done: done_rx,
                thread: Some(handle),
            }
        }
        ExecMode::Pooled => {
            inject(Box::new(job));
            Task {
                done: done_rx,
                thread: None,
            }
        }
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Queues a job on the shared pool, starting the workers on first use.
///
/// Workers block on the queue between jobs and swallow job panics, so one
/// failed producer cannot shrink the pool for later invocations.
fn inject(job: Job) {
    static QUEUE: OnceLock<flume::Sender<Job>> = OnceLock::new();
    let queue = QUEUE.get_or_init(|| {
        let (tx, rx) = flume::unbounded::<Job>();
        for i in 0..POOL_WORKERS {
            let rx = rx.clone();
            thread::Builder::new()
                .name(format!("staffetta-worker-{i}"))
                .spawn(move || {
                    for job in rx.iter() {
                        let _ = catch_unwind(AssertUnwindSafe(job));
                    }
                })
                .expect("failed to spawn pool worker");
        }
        tx
    });
    if queue.send(job).is_err() {
        panic!("worker pool queue closed");
    }
}
