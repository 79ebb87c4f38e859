//! # rflux Store Benchmarks
//!
//! | Operation | Path |
//! |-----------|------|
//! | create | `RocketsApi::create` → `KeyedStore::add` |
//! | guarded patch | `RocketsApi::patch_status` → `KeyedStore::modify` |
//! | launch | `LaunchApi::launch` → modify + append |
//! | snapshot | `KeyedStore::find_all` |
//! | attach | `KeyedStore::subscribe` with a seed |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rf_02_rocket_lifecycle::{AddRocketCommand, RocketsApi};
use rf_03_launch_control::LaunchApi;
use service_runtime::{ServiceConfig, ServiceContainer};
use shared_bus::EventFilter;
use shared_types::{Status, TargetCoordinates, Warhead};

fn add_command() -> AddRocketCommand {
    AddRocketCommand {
        warhead: Warhead::Conventional,
        target: TargetCoordinates::new(12.5, -33.0),
    }
}

fn populated(size: usize) -> ServiceContainer {
    let container = ServiceContainer::new(ServiceConfig::default());
    for _ in 0..size {
        let _ = container.rockets.create(add_command());
    }
    container
}

fn bench_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rocket-writes");
    let container = ServiceContainer::new(ServiceConfig::default());

    group.bench_function("create", |b| {
        b.iter(|| black_box(container.rockets.create(add_command())))
    });

    let rocket = container.rockets.create(add_command());
    if let Ok(rocket) = rocket {
        let mut ready = false;
        group.bench_function("patch_status", |b| {
            b.iter(|| {
                ready = !ready;
                let status = if ready { Status::Ready } else { Status::NotReady };
                black_box(container.rockets.patch_status(rocket.id, status))
            })
        });
    }

    group.bench_function("launch", |b| {
        b.iter_batched(
            || {
                let id = container.rockets.create(add_command()).map(|r| r.id);
                if let Ok(id) = id {
                    let _ = container.rockets.patch_status(id, Status::Ready);
                }
                id
            },
            |id| id.map(|id| black_box(container.launches.launch(id))),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("rocket-reads");

    for size in [10, 100, 1_000, 10_000] {
        let container = populated(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("find_all", size), &size, |b, _| {
            b.iter(|| black_box(container.rocket_store.find_all()))
        });

        group.bench_with_input(BenchmarkId::new("subscribe", size), &size, |b, _| {
            b.iter(|| black_box(container.rocket_store.subscribe(EventFilter::all())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_writes, bench_reads);
criterion_main!(benches);
