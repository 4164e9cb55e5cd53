//! Rendezvous-queue handoff: staffetta's flume-backed variant vs raw
//! zero-capacity channels from other implementations.
//!
//! A zero-capacity channel spins briefly before blocking, and both loop
//! bodies here are very quick, so expect numbers closer to busy-spinning
//! than to parking. The raw comparisons drive the same producer loop over
//! each library's rendezvous channel directly, without the scenario
//! lifecycle, to show what the primitive itself costs.

use crossbeam_channel::bounded as crossbeam_bounded;
use kanal::bounded as kanal_bounded;
use staffetta::Term;
use staffetta::exec::ExecMode;
use staffetta::fib::{self, FibGen};
use staffetta::handoff::rendezvous;
use staffetta::scenario::{Config, Scenario};
use std::thread;
use test::Bencher;

const BASE_ITERATIONS: u64 = 100_000;

fn each(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, rendezvous::channel());
        for _ in 0..n {
            test::black_box(scenario.consume_one().unwrap());
        }
        scenario.stop().unwrap();
    });
}

fn sum(b: &mut Bencher, mode: ExecMode) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let mut scenario = Scenario::start(mode, rendezvous::channel());
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

#[bench]
fn raw_crossbeam(b: &mut Bencher) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let (tx, rx) = crossbeam_bounded::<Term>(0);
        let producer = thread::spawn(move || {
            let mut fib = FibGen::new();
            while tx.send(fib.next()).is_ok() {}
        });
        let mut sum: Term = 0;
        for _ in 0..n {
            sum = sum.wrapping_add(rx.recv().unwrap());
        }
        fib::verify(n, sum).unwrap();
        drop(rx);
        producer.join().unwrap();
        test::black_box(sum)
    });
}

#[bench]
fn raw_kanal(b: &mut Bencher) {
    let n = Config::from_env().scaled(BASE_ITERATIONS);
    b.iter(|| {
        let (tx, rx) = kanal_bounded::<Term>(0);
        let producer = thread::spawn(move || {
            let mut fib = FibGen::new();
            while tx.send(fib.next()).is_ok() {}
        });
        let mut sum: Term = 0;
        for _ in 0..n {
            sum = sum.wrapping_add(rx.recv().unwrap());
        }
        fib::verify(n, sum).unwrap();
        drop(rx);
        producer.join().unwrap();
        test::black_box(sum)
    });
}
