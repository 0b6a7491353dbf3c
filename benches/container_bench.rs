//! Benchmark for the function container.
//!
//! Measures cached fetches, alias resolution, and contended first fetches.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use funbox::container::{Resolve, define};
use funbox::operations;
use funbox::{Container, Value};
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;

fn populated() -> Container {
    let container = Container::new();
    operations::install(&container).unwrap();
    define(&container, |root| {
        root.namespace("app", |app| {
            app.namespace("math", |math| {
                for index in 0..100 {
                    math.f(&format!("value{index}"), move |_| Ok(Value::Int(index)))?;
                }
                Ok(())
            })
        })
    })
    .unwrap();
    container
}

// =============================================================================
// Fetch Benchmarks
// =============================================================================

fn benchmark_fetch(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("container_fetch");
    let container = populated();
    container.fetch("app.math.value50").unwrap();

    group.bench_function("cached", |bencher| {
        bencher.iter(|| black_box(container.fetch("app.math.value50")));
    });

    group.bench_function("missing", |bencher| {
        bencher.iter(|| black_box(container.fetch("app.math.absent")));
    });

    group.finish();
}

// =============================================================================
// Resolution Benchmarks
// =============================================================================

fn benchmark_resolve(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("container_resolve");
    let container = populated();

    for depth in [1, 4, 16] {
        let mut aliases: Vec<String> = (0..depth - 1).map(|index| format!("unused{index}")).collect();
        aliases.insert(0, "app.math".to_string());
        let resolve = Resolve::build(&container, aliases);

        group.bench_with_input(BenchmarkId::new("alias_depth", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(resolve.resolve("value7")));
        });
    }

    let shortcut = Resolve::build(&container, [("app.math", "m")]);
    group.bench_function("shortcut", |bencher| {
        bencher.iter(|| black_box(shortcut.resolve("m.value7")));
    });

    group.finish();
}

// =============================================================================
// Contention Benchmarks
// =============================================================================

fn benchmark_contended_first_fetch(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("container_contention");

    for threads in [2, 8] {
        group.bench_with_input(BenchmarkId::new("first_fetch", threads), &threads, |bencher, &threads| {
            bencher.iter(|| {
                let container = Container::new();
                container.define("shared", || Ok(Value::Int(1))).unwrap();
                let barrier = Arc::new(Barrier::new(threads));

                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let container = container.clone();
                        let barrier = Arc::clone(&barrier);
                        thread::spawn(move || {
                            barrier.wait();
                            container.fetch("shared")
                        })
                    })
                    .collect();

                for handle in handles {
                    black_box(handle.join().unwrap()).unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fetch,
    benchmark_resolve,
    benchmark_contended_first_fetch
);
criterion_main!(benches);
