//! A lazy, namespace-scoped function container.
//!
//! This module provides a registry that maps dotted keys such as
//! `app.math.sum` to lazily evaluated definitions, plus the tools to fill
//! and query it:
//!
//! - [`Container`]: the registry itself, with exactly-once evaluation
//! - [`Config`]: the override policy
//! - [`Resolve`] and [`Alias`]: short-key lookup through namespace aliases
//! - [`Define`] and [`define`]: the nested namespace builder
//! - [`Import`] and [`Mixin`]: bound, reusable lookup capabilities
//! - [`Dsl`]: a self-contained definition scope
//! - [`DefinitionPath`] and [`DefinitionPaths`]: tracked definition files
//! - [`global`]: the process-wide default container
//!
//! # Examples
//!
//! ```rust
//! use funbox::container::{Container, define};
//! use funbox::{Function, Value, call};
//!
//! let container = Container::new();
//!
//! define(&container, |root| {
//!     root.namespace("app", |app| {
//!         app.namespace("math", |math| {
//!             math.f("sum", |_| {
//!                 Ok(Function::from_fn2("sum", |left, right| {
//!                     Ok(Value::Int(left.as_int()? + right.as_int()?))
//!                 })
//!                 .curried()
//!                 .into())
//!             })?;
//!             math.f("double_sum", |scope| {
//!                 let sum = scope.resolve("sum")?;
//!                 Ok(Function::from_fn2("double_sum", move |left, right| {
//!                     Ok(Value::Int(2 * call!(sum, left.clone(), right.clone())?.as_int()?))
//!                 })
//!                 .into())
//!             })
//!         })
//!     })
//! })
//! .unwrap();
//!
//! let sum = container.fetch("app.math.sum").unwrap();
//! assert_eq!(call!(sum, 2, 3).unwrap(), Value::Int(5));
//!
//! let double_sum = container.fetch("app.math.double_sum").unwrap();
//! assert_eq!(call!(double_sum, 2, 3).unwrap(), Value::Int(10));
//! ```

mod alias;
mod config;
mod define;
mod definition_path;
mod dsl;
mod entry;
pub mod global;
mod mixin;
mod resolve;

pub use alias::{Alias, AliasTable};
pub use config::{ALLOW_OVERRIDE_ENV, Config};
pub use define::{Define, define};
pub use definition_path::{DefinitionPath, DefinitionPaths};
pub use dsl::Dsl;
pub use entry::Thunk;
pub use mixin::{Import, Mixin};
pub use resolve::Resolve;

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::curry::Value;
use crate::error::{Error, Result};
use entry::Entry;

/// Separator between namespace segments of a key.
pub const NAMESPACE_SEPARATOR: &str = ".";

#[cfg(feature = "fxhash")]
type Storage = rustc_hash::FxHashMap<String, Arc<Entry>>;

#[cfg(not(feature = "fxhash"))]
type Storage = std::collections::HashMap<String, Arc<Entry>>;

struct Inner {
    config: Config,
    storage: RwLock<Storage>,
    definition_paths: DefinitionPaths,
}

/// A registry of lazily evaluated definitions keyed by dotted strings.
///
/// `Container` is a cheap, clonable handle; clones share the same storage.
/// Keys are opaque to the container: `app.math` and `app.math.sum` may both
/// be defined. Definitions are thunks that run on the first
/// [`fetch`](Self::fetch) of their key, exactly once, even when several
/// threads fetch concurrently. Their result, including `Nil` and any
/// error, is cached.
///
/// # Examples
///
/// ```rust
/// use funbox::{Container, Error, Value};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let container = Container::new();
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
///
/// container
///     .define("answer", move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(Value::Int(42))
///     })
///     .unwrap();
///
/// assert_eq!(container.fetch("answer").unwrap(), Value::Int(42));
/// assert_eq!(container.fetch("answer").unwrap(), Value::Int(42));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
///
/// assert_eq!(
///     container.define("answer", || Ok(Value::Nil)),
///     Err(Error::duplicate_key("answer"))
/// );
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>,
}

/// A non-owning handle to a [`Container`].
#[derive(Clone)]
pub(crate) struct WeakContainer {
    inner: Weak<Inner>,
}

impl WeakContainer {
    pub(crate) fn upgrade(&self) -> Option<Container> {
        self.inner.upgrade().map(|inner| Container { inner })
    }
}

static_assertions::assert_impl_all!(Container: Send, Sync, Clone);

impl Container {
    /// Creates an empty container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty container with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                storage: RwLock::new(Storage::default()),
                definition_paths: DefinitionPaths::new(),
            }),
        }
    }

    /// The configuration this container was created with.
    pub fn config(&self) -> Config {
        self.inner.config
    }

    /// The definition files tracked for this container.
    ///
    /// [`define()`](crate::container::define()) marks the file it is called
    /// from as loaded here. An external loader or file watcher uses the
    /// same set.
    pub fn definition_paths(&self) -> &DefinitionPaths {
        &self.inner.definition_paths
    }

    /// Registers `thunk` under `key` without running it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDefinition`] when the key is empty or has an empty
    ///   dotted segment
    /// - [`Error::DuplicateKey`] when the key exists and overrides are
    ///   disallowed
    pub fn define<F>(&self, key: impl Into<String>, thunk: F) -> Result<()>
    where
        F: FnOnce() -> Result<Value> + Send + 'static,
    {
        let key = key.into();
        validate_key(&key)?;

        let mut storage = self.inner.storage.write();
        let overridden = storage.contains_key(&key);
        if overridden && self.inner.config.cant_override() {
            return Err(Error::duplicate_key(key));
        }

        tracing::debug!(key = %key, overridden, "defining container key");
        let entry = Entry::new(key.clone(), Box::new(thunk));
        storage.insert(key, Arc::new(entry));
        Ok(())
    }

    /// Registers an already computed value under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`define`](Self::define).
    pub fn define_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.define(key, move || Ok(value))
    }

    /// Returns the value of `key`, evaluating its definition on first use.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] when the key was never defined
    /// - [`Error::CyclicDefinition`] when the definition fetches itself
    /// - any error returned by the definition (cached for later fetches)
    pub fn fetch(&self, key: &str) -> Result<Value> {
        let entry = self
            .inner
            .storage
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::key_not_found(key))?;
        entry.force()
    }

    /// Returns `true` when `key` is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.storage.read().contains_key(key)
    }

    /// Returns `true` when `key` is defined and its definition already ran.
    pub fn is_evaluated(&self, key: &str) -> bool {
        self.inner
            .storage
            .read()
            .get(key)
            .is_some_and(|entry| entry.is_evaluated())
    }

    /// All defined keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.storage.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of defined keys.
    pub fn len(&self) -> usize {
        self.inner.storage.read().len()
    }

    /// Returns `true` when nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates an [`Import`] bound to this container and `aliases`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funbox::{Container, Value};
    ///
    /// let container = Container::new();
    /// container.define_value("app.math.pi", 2.5).unwrap();
    ///
    /// let math = container.import([("app.math", "m")]);
    /// assert_eq!(math.f("m.pi").unwrap(), Value::Float(2.5));
    /// ```
    pub fn import<I, A>(&self, aliases: I) -> Import
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        Import::new(self, aliases)
    }

    /// Returns `true` when both handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakContainer {
        WeakContainer {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Container")
            .field("config", &self.inner.config)
            .field("len", &self.len())
            .field("definition_paths", &self.inner.definition_paths)
            .finish()
    }
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_definition(key, "key is empty"));
    }
    if key.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
        return Err(Error::invalid_definition(key, "key has an empty segment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sum")]
    #[case("app.math.sum")]
    #[case("app.math")]
    fn valid_keys(#[case] key: &str) {
        assert_eq!(validate_key(key), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case(".sum")]
    #[case("app.")]
    #[case("app..sum")]
    fn invalid_keys(#[case] key: &str) {
        assert!(matches!(
            validate_key(key),
            Err(Error::InvalidDefinition { .. })
        ));
    }

    #[rstest]
    fn weak_handle_does_not_keep_container_alive() {
        let container = Container::new();
        let weak = container.downgrade();

        assert!(weak.upgrade().is_some());
        drop(container);
        assert!(weak.upgrade().is_none());
    }

    #[rstest]
    fn clones_share_storage() {
        let container = Container::new();
        let clone = container.clone();

        container.define_value("key", 1).unwrap();

        assert!(clone.contains("key"));
        assert!(clone.ptr_eq(&container));
    }

    #[rstest]
    fn debug_reports_length() {
        let container = Container::new();
        container.define_value("key", 1).unwrap();

        assert!(format!("{container:?}").contains("len: 1"));
    }
}
