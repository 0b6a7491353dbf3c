//! A registry entry: a definition thunk evaluated at most once.

use std::fmt;
use std::mem;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::LazyLock;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::curry::Value;
use crate::error::{Error, Result};

/// The deferred definition stored for a key.
pub type Thunk = Box<dyn FnOnce() -> Result<Value> + Send>;

/// An edge of the wait graph: the thread a fetcher blocks on, and the
/// address of the entry it waits for.
type WaitEdge = (ThreadId, usize);

#[cfg(feature = "fxhash")]
type WaitGraph = rustc_hash::FxHashMap<ThreadId, WaitEdge>;

#[cfg(not(feature = "fxhash"))]
type WaitGraph = std::collections::HashMap<ThreadId, WaitEdge>;

/// Which thread each blocked fetcher is waiting on. The graph never holds
/// a cycle: an edge that would close one is refused.
static WAITING_ON: LazyLock<Mutex<WaitGraph>> =
    LazyLock::new(|| Mutex::new(WaitGraph::default()));

/// Records that `waiter` blocks on `owner` until `entry` settles. Returns
/// `false`, leaving the graph untouched, when `owner` already waits on
/// `waiter` transitively.
fn start_waiting(waiter: ThreadId, owner: ThreadId, entry: usize) -> bool {
    let mut graph = WAITING_ON.lock();
    let mut next = owner;
    while let Some(&(blocked_on, _)) = graph.get(&next) {
        if blocked_on == waiter {
            return false;
        }
        next = blocked_on;
    }
    graph.insert(waiter, (owner, entry));
    true
}

fn stop_waiting(waiter: ThreadId) {
    WAITING_ON.lock().remove(&waiter);
}

/// Drops every edge into `entry`. Runs before waiters are woken so the
/// settling thread is never blamed for a wait that is already over.
fn release_waiters(entry: usize) {
    WAITING_ON
        .lock()
        .retain(|_, &mut (_, waited_for)| waited_for != entry);
}

/// The internal state of an [`Entry`].
enum EntryState {
    /// Not evaluated yet. Contains the definition.
    Pending(Thunk),
    /// The definition is running on the given thread.
    Evaluating(ThreadId),
    /// The definition produced a value.
    Ready(Value),
    /// The definition failed or panicked. It is never run again.
    Failed(Error),
}

/// A lazily evaluated definition with memoization.
///
/// Only one caller ever runs the thunk. Concurrent callers block until the
/// evaluation finishes and then receive the same value (or the same error).
/// The lock is not held while the thunk runs, so a thunk may fetch other
/// entries. A fetch that would wait on itself, directly or through other
/// threads that are waiting in turn, returns [`Error::CyclicDefinition`].
pub(crate) struct Entry {
    key: String,
    state: Mutex<EntryState>,
    settled: Condvar,
}

impl Entry {
    pub(crate) fn new(key: String, thunk: Thunk) -> Self {
        Self {
            key,
            state: Mutex::new(EntryState::Pending(thunk)),
            settled: Condvar::new(),
        }
    }

    /// Returns `true` once the thunk has produced a value or failed.
    pub(crate) fn is_evaluated(&self) -> bool {
        matches!(
            &*self.state.lock(),
            EntryState::Ready(_) | EntryState::Failed(_)
        )
    }

    /// Forces the entry, running the thunk if nobody has yet.
    pub(crate) fn force(&self) -> Result<Value> {
        let current = thread::current().id();
        let mut state = self.state.lock();

        loop {
            match &*state {
                EntryState::Ready(value) => {
                    tracing::trace!(key = %self.key, "container cache hit");
                    return Ok(value.clone());
                }
                EntryState::Failed(error) => return Err(error.clone()),
                EntryState::Evaluating(owner) => {
                    let owner = *owner;
                    if owner == current || !start_waiting(current, owner, self.address()) {
                        tracing::warn!(key = %self.key, "cyclic definition");
                        return Err(Error::CyclicDefinition {
                            key: self.key.clone(),
                        });
                    }
                    self.settled.wait(&mut state);
                    stop_waiting(current);
                }
                EntryState::Pending(_) => break,
            }
        }

        let EntryState::Pending(thunk) = mem::replace(&mut *state, EntryState::Evaluating(current))
        else {
            return Err(Error::CyclicDefinition {
                key: self.key.clone(),
            });
        };
        drop(state);

        tracing::debug!(key = %self.key, "evaluating definition");
        let outcome = catch_unwind(AssertUnwindSafe(thunk));

        let mut state = self.state.lock();
        let result = match outcome {
            Ok(Ok(value)) => {
                *state = EntryState::Ready(value.clone());
                Ok(value)
            }
            Ok(Err(error)) => {
                tracing::warn!(key = %self.key, %error, "definition failed");
                *state = EntryState::Failed(error.clone());
                Err(error)
            }
            Err(payload) => {
                tracing::warn!(key = %self.key, "definition panicked");
                *state = EntryState::Failed(Error::failed(format!(
                    "definition of {:?} panicked",
                    self.key
                )));
                drop(state);
                release_waiters(self.address());
                self.settled.notify_all();
                resume_unwind(payload);
            }
        };
        drop(state);
        release_waiters(self.address());
        self.settled.notify_all();
        result
    }

    fn address(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.lock() {
            EntryState::Pending(_) => "pending",
            EntryState::Evaluating(_) => "evaluating",
            EntryState::Ready(_) => "ready",
            EntryState::Failed(_) => "failed",
        };
        formatter
            .debug_struct("Entry")
            .field("key", &self.key)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_entry(counter: &Arc<AtomicUsize>, value: Value) -> Entry {
        let counter = Arc::clone(counter);
        Entry::new(
            "key".to_string(),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            }),
        )
    }

    #[rstest]
    fn entry_defers_evaluation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let entry = counting_entry(&counter, Value::Int(42));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!entry.is_evaluated());
    }

    #[rstest]
    fn entry_memoizes_nil() {
        let counter = Arc::new(AtomicUsize::new(0));
        let entry = counting_entry(&counter, Value::Nil);

        assert_eq!(entry.force(), Ok(Value::Nil));
        assert_eq!(entry.force(), Ok(Value::Nil));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(entry.is_evaluated());
    }

    #[rstest]
    fn failed_entry_is_not_retried() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let entry = Entry::new(
            "broken".to_string(),
            Box::new(move || {
                counter_clone.fetch_add(1, Ordering::SeqCst);
                Err(Error::failed("boom"))
            }),
        );

        assert_eq!(entry.force(), Err(Error::failed("boom")));
        assert_eq!(entry.force(), Err(Error::failed("boom")));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn panicking_entry_is_poisoned() {
        let entry = Entry::new(
            "panics".to_string(),
            Box::new(|| -> Result<Value> { panic!("boom") }),
        );

        let first = catch_unwind(AssertUnwindSafe(|| entry.force()));
        assert!(first.is_err());
        assert!(matches!(entry.force(), Err(Error::Failed { .. })));
    }

    #[rstest]
    fn wait_graph_refuses_an_edge_that_closes_a_cycle() {
        let ids: Vec<ThreadId> = (0..3)
            .map(|_| thread::spawn(|| thread::current().id()).join().unwrap())
            .collect();

        assert!(start_waiting(ids[0], ids[1], 1));
        assert!(start_waiting(ids[1], ids[2], 2));
        assert!(!start_waiting(ids[2], ids[0], 3));

        stop_waiting(ids[1]);
        assert!(start_waiting(ids[2], ids[0], 3));

        stop_waiting(ids[0]);
        stop_waiting(ids[2]);
    }

    #[rstest]
    fn settled_entry_releases_its_waiters() {
        let ids: Vec<ThreadId> = (0..2)
            .map(|_| thread::spawn(|| thread::current().id()).join().unwrap())
            .collect();
        let settled = Entry::new("settled".to_string(), Box::new(|| Ok(Value::Nil)));

        assert!(start_waiting(ids[0], ids[1], settled.address()));
        assert!(!start_waiting(ids[1], ids[0], 0));

        release_waiters(settled.address());
        assert!(start_waiting(ids[1], ids[0], 0));

        stop_waiting(ids[1]);
    }

    #[rstest]
    fn debug_reports_state() {
        let entry = Entry::new("key".to_string(), Box::new(|| Ok(Value::Nil)));
        assert!(format!("{entry:?}").contains("pending"));
        let _ = entry.force();
        assert!(format!("{entry:?}").contains("ready"));
    }
}
