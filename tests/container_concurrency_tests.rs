//! Concurrency tests for the function container.

use funbox::container::define;
use funbox::{Container, Error, Value};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;

// =============================================================================
// Exactly-once Under Contention
// =============================================================================

#[rstest]
fn concurrent_fetches_evaluate_once() {
    let container = Container::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    container
        .define("slow", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            Ok(Value::Int(7))
        })
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.fetch("slow")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(Value::Int(7)));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn concurrent_fetches_share_a_failure() {
    let container = Container::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    container
        .define("broken", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            Err(Error::failed("unavailable"))
        })
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.fetch("broken")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Err(Error::failed("unavailable")));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn dependent_definitions_evaluate_once_under_contention() {
    let container = Container::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    define(&container, move |root| {
        root.namespace("app", |app| {
            app.f("base", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(10));
                Ok(Value::Int(20))
            })?;
            app.f("left", |scope| Ok(Value::Int(scope.resolve("base")?.as_int()? + 1)))?;
            app.f("right", |scope| Ok(Value::Int(scope.resolve("base")?.as_int()? + 2)))
        })
    })
    .unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = ["app.left", "app.right"]
        .into_iter()
        .map(|key| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.fetch(key)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    assert_eq!(results, vec![Ok(Value::Int(21)), Ok(Value::Int(22))]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Concurrent Definition
// =============================================================================

#[rstest]
fn concurrent_defines_of_distinct_keys_all_land() {
    let container = Container::new();

    let handles: Vec<_> = (0..THREADS)
        .map(|index| {
            let container = container.clone();
            thread::spawn(move || container.define_value(format!("key{index}"), index))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(container.len(), THREADS);
}

#[rstest]
fn concurrent_defines_of_one_key_admit_exactly_one() {
    let container = Container::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|index| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.define_value("contested", index)
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(Result::is_ok)
        .count();

    assert_eq!(successes, 1);
}

// =============================================================================
// Cycles Across Threads
// =============================================================================

#[rstest]
fn cycle_split_across_threads_fails_instead_of_hanging() {
    let container = Container::new();
    let barrier = Arc::new(Barrier::new(2));
    let barrier_a = Arc::clone(&barrier);
    let barrier_b = Arc::clone(&barrier);

    define(&container, move |root| {
        root.f("a", move |scope| {
            barrier_a.wait();
            scope.resolve("b")
        })?;
        root.f("b", move |scope| {
            barrier_b.wait();
            scope.resolve("a")
        })
    })
    .unwrap();

    let handles: Vec<_> = ["a", "b"]
        .into_iter()
        .map(|key| {
            let container = container.clone();
            thread::spawn(move || container.fetch(key))
        })
        .collect();

    for handle in handles {
        assert!(matches!(
            handle.join().unwrap(),
            Err(Error::CyclicDefinition { .. })
        ));
    }
}

#[rstest]
fn cycle_through_three_threads_fails_instead_of_hanging() {
    let container = Container::new();
    let barrier = Arc::new(Barrier::new(3));
    let links = [("x", "y"), ("y", "z"), ("z", "x")];

    for (key, next) in links {
        let barrier = Arc::clone(&barrier);
        define(&container, move |root| {
            root.f(key, move |scope| {
                barrier.wait();
                scope.resolve(next)
            })
        })
        .unwrap();
    }

    let handles: Vec<_> = links
        .into_iter()
        .map(|(key, _)| {
            let container = container.clone();
            thread::spawn(move || container.fetch(key))
        })
        .collect();

    for handle in handles {
        assert!(matches!(
            handle.join().unwrap(),
            Err(Error::CyclicDefinition { .. })
        ));
    }
}
