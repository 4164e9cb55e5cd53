//! Direct park/unpark handoff.
//!
//! No lock: each side suspends itself and is woken by an unpark aimed at
//! its thread. Park and unpark cannot happen atomically as one operation,
//! so the two threads technically run in parallel — this measures the raw
//! cost of a targeted OS suspend/resume pair.

use staffetta::exec::ExecMode;
use staffetta::fib;
use staffetta::handoff::park;
use staffetta::scenario::{Config, Scenario};
use test::Bencher;

const BASE_ITERATIONS: u64 = 10_000;

fn each(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, park::channel());
        for _ in 0..n {
            test::black_box(scenario.consume_one().unwrap());
        }
        scenario.stop().unwrap();
    });
}

fn sum(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, park::channel());
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
