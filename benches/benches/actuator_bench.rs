//! # Actuator Benchmarks
//!
//! Measures command fan-out, aggregation and claim/release of groups.
//!
//! Run: `cargo bench --bench actuator_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mech_actuator::{average, Actuator, ActuatorGroup, ControllerId, SimulatedDriver};

fn actuators(n: usize) -> Vec<Actuator> {
    (0..n)
        .map(|i| Actuator::new(SimulatedDriver::new(), i % 2 == 1))
        .collect()
}

/// Benchmark a single inverted write
fn bench_set_output(c: &mut Criterion) {
    let actuator = Actuator::new(SimulatedDriver::new(), true);

    c.bench_function("actuator/set_output", |b| {
        b.iter(|| actuator.set_output(black_box(0.4)))
    });
}

/// Benchmark aggregation and group writes
fn bench_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("group");

    for size in [1, 4, 16] {
        let members = actuators(size);
        group.bench_with_input(BenchmarkId::new("average", size), &members, |b, m| {
            b.iter(|| black_box(average(m)))
        });

        let actuator_group = ActuatorGroup::new(members.clone()).expect("non-empty group");
        let lease = actuator_group
            .claim(ControllerId::next())
            .expect("unclaimed group");
        group.bench_with_input(BenchmarkId::new("set_all", size), &size, |b, _| {
            b.iter(|| lease.set_all(black_box(0.3)))
        });
        drop(lease);

        group.bench_with_input(BenchmarkId::new("claim_release", size), &size, |b, _| {
            b.iter(|| {
                let lease = actuator_group.claim(ControllerId::next());
                black_box(lease.is_ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set_output, bench_group);

criterion_main!(benches);
