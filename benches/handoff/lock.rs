//! Mutex + condvar handoff.
//!
//! Two threads alternate through one lock and one condvar; every handoff is
//! a blocking wait and an OS wake on each side. Threads never run in
//! parallel — execution is fully sequential, so this measures the cost of a
//! condvar round trip. Per-handoff cost is iteration time divided by the
//! (scaled) base count; the start handshake keeps thread startup out of the
//! steady state.

use staffetta::exec::ExecMode;
use staffetta::fib;
use staffetta::handoff::lock;
use staffetta::scenario::{Config, Scenario};
use test::Bencher;

const BASE_ITERATIONS: u64 = 10_000;

fn each(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, lock::channel());
        for _ in 0..n {
            test::black_box(scenario.consume_one().unwrap());
        }
        scenario.stop().unwrap();
    });
}

fn sum(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, lock::channel());
        let sum = scenario.consume_n(n).unwrap();
        fib::verify(n, sum).unwrap();
        scenario.stop().unwrap();
        test::black_box(sum)
    });
}

#[bench]
fn each_os(b: &mut Bencher) {
    each(b, ExecMode::Os);
}

#[bench]
fn each_pooled(b: &mut Bencher) {
    each(b, ExecMode::Pooled);
}

#[bench]
fn sum_os(b: &mut Bencher) {
    sum(b, ExecMode::Os);
}

#[bench]
fn sum_pooled(b: &mut Bencher) {
    sum(b, ExecMode::Pooled);
}
