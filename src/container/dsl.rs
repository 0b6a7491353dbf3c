//! A self-contained definition scope.

use super::Container;
use super::config::Config;
use super::define::Define;
use super::resolve::Resolve;
use crate::curry::Value;
use crate::error::Result;

/// A definition scope that owns a private container.
///
/// Unlike a shared container, a `Dsl` allows redefinition: defining the
/// same key again replaces it, which suits scopes that are rebuilt while a
/// program runs.
///
/// # Examples
///
/// ```rust
/// use funbox::container::Dsl;
/// use funbox::Value;
///
/// let dsl = Dsl::new();
/// dsl.namespace("math", |math| math.f("zero", |_| Ok(Value::Int(0)))).unwrap();
/// dsl.namespace("math", |math| math.f("zero", |_| Ok(Value::Float(0.0)))).unwrap();
///
/// assert_eq!(dsl.get("math.zero").unwrap(), Value::Float(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Dsl {
    define: Define,
    resolve: Resolve,
}

impl Dsl {
    /// Creates a scope with an empty, override-enabled container.
    pub fn new() -> Self {
        let container = Container::with_config(Config::new().with_allow_override(true));
        Self {
            define: Define::build(&container),
            resolve: Resolve::new(&container),
        }
    }

    /// Opens a namespace; see [`Define::namespace`].
    ///
    /// # Errors
    ///
    /// Same as [`Define::namespace`].
    pub fn namespace<F>(&self, name: impl Into<String>, block: F) -> Result<()>
    where
        F: FnOnce(&Define) -> Result<()>,
    {
        self.define.namespace(name, block)
    }

    /// Registers a top-level definition; see [`Define::function`].
    ///
    /// # Errors
    ///
    /// Same as [`Define::function`].
    pub fn function<F>(&self, name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&Resolve) -> Result<Value> + Send + 'static,
    {
        self.define.function(name, block)
    }

    /// Shorthand for [`function`](Self::function).
    ///
    /// # Errors
    ///
    /// Same as [`Define::function`].
    #[inline]
    pub fn f<F>(&self, name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&Resolve) -> Result<Value> + Send + 'static,
    {
        self.function(name, block)
    }

    /// Looks up a fully qualified key.
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    pub fn get(&self, key: &str) -> Result<Value> {
        self.resolve.resolve(key)
    }

    /// The private container.
    pub fn container(&self) -> &Container {
        self.resolve.container()
    }
}

impl Default for Dsl {
    fn default() -> Self {
        Self::new()
    }
}
