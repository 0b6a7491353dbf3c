//! Error types shared by the curry engine and the function container.
//!
//! Every fallible operation in this crate returns [`Result`]. Errors are
//! `Clone` so that a failed definition can be cached by the container and
//! handed out again on every later fetch of the same key.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents every failure the crate can report.
///
/// # Examples
///
/// ```rust
/// use funbox::Error;
///
/// let error = Error::key_not_found("app.math.sum");
/// assert_eq!(error.to_string(), "key \"app.math.sum\" has not been registered");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key was defined twice while the container does not allow overrides.
    #[error("{key:?} is already defined")]
    DuplicateKey {
        /// The key that already exists.
        key: String,
    },

    /// A definition could not be registered.
    #[error("invalid definition for {key:?}: {reason}")]
    InvalidDefinition {
        /// The offending key or namespace segment.
        key: String,
        /// Why the definition was rejected.
        reason: String,
    },

    /// No candidate key exists in the container.
    #[error("key {key:?} has not been registered")]
    KeyNotFound {
        /// The key originally requested by the caller.
        key: String,
    },

    /// The process-wide default container was configured twice.
    #[error("the global container has already been configured")]
    GlobalAlreadyConfigured,

    /// A function received more arguments than it declares.
    #[error("{function}: wrong number of arguments (given {given}, expected {expected})")]
    Arity {
        /// Name of the function that was called.
        function: String,
        /// Human readable arity, e.g. `2` or `1+`.
        expected: String,
        /// Number of arguments supplied.
        given: usize,
    },

    /// A value had a different variant than the operation needs.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected variant name.
        expected: &'static str,
        /// Variant name actually found.
        found: &'static str,
    },

    /// A definition transitively fetched itself while being evaluated.
    #[error("cyclic definition detected while evaluating {key:?}")]
    CyclicDefinition {
        /// The key whose evaluation re-entered itself.
        key: String,
    },

    /// A user-defined thunk or function body failed.
    #[error("{message}")]
    Failed {
        /// The failure message.
        message: String,
    },
}

impl Error {
    /// Creates a [`Error::KeyNotFound`] for `key`.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates a [`Error::DuplicateKey`] for `key`.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a [`Error::InvalidDefinition`].
    pub fn invalid_definition(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`Error::Failed`] carrying `message`.
    ///
    /// This is the error user code should return from definition blocks
    /// and native function bodies.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns `true` when this is a `KeyNotFound` naming exactly `key`.
    pub(crate) fn is_missing(&self, key: &str) -> bool {
        matches!(self, Self::KeyNotFound { key: missing } if missing == key)
    }
}
