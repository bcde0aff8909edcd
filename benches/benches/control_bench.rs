//! # Control Benchmarks
//!
//! Measures the pure control laws and a full controller tick against
//! simulated drivers.
//!
//! Run: `cargo bench --bench control_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mech_actuator::{Actuator, ActuatorGroup, SimulatedDriver};
use mech_control::{hold_law, move_law, ActiveHold, BoundedMove, HoldConfig, MoveConfig};

fn group_of(n: usize) -> ActuatorGroup {
    let actuators = (0..n)
        .map(|i| Actuator::new(SimulatedDriver::new(), i % 2 == 1))
        .collect();
    ActuatorGroup::new(actuators).expect("non-empty group")
}

/// Benchmark the stateless laws
fn bench_laws(c: &mut Criterion) {
    let mut group = c.benchmark_group("laws");

    let move_config = MoveConfig::default();
    let hold_config = HoldConfig::default();

    group.bench_function("move_law", |b| {
        b.iter(|| black_box(move_law(&move_config, black_box(3.2), black_box(7.5))))
    });

    group.bench_function("hold_law", |b| {
        b.iter(|| black_box(hold_law(&hold_config, black_box(4.1), black_box(6.0))))
    });

    group.finish();
}

/// Benchmark one controller tick for growing groups
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for size in [1, 2, 4, 8] {
        let mut mover = BoundedMove::new(group_of(size), MoveConfig::default())
            .expect("valid move config");
        mover.start_move(9.0).expect("claim");

        group.bench_with_input(BenchmarkId::new("bounded_move", size), &size, |b, _| {
            b.iter(|| black_box(mover.tick(black_box(2.0))))
        });

        let mut holder = ActiveHold::new(group_of(size), HoldConfig::default(), 6.0)
            .expect("valid hold config");
        holder.activate().expect("claim");

        group.bench_with_input(BenchmarkId::new("active_hold", size), &size, |b, _| {
            b.iter(|| black_box(holder.tick()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_laws, bench_tick);

criterion_main!(benches);
