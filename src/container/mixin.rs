//! Reusable, pre-configured lookup capabilities.

use super::Container;
use super::alias::{Alias, AliasTable};
use super::resolve::Resolve;
use crate::curry::Value;
use crate::error::Result;

/// A lookup capability bound to a container and a fixed alias set.
///
/// An `Import` lets a consumer reach a container's functions without
/// holding the container itself. Several imports with different aliases
/// can be kept side by side.
///
/// # Examples
///
/// ```rust
/// use funbox::{Container, Value};
///
/// let container = Container::new();
/// container.define_value("app.math.pi", 3.0).unwrap();
/// container.define_value("app.text.hello", "hello").unwrap();
///
/// let math = container.import([("app.math", "m")]);
/// let text = container.import(["app.text"]);
///
/// assert_eq!(math.f("m.pi").unwrap(), Value::Float(3.0));
/// assert_eq!(text.f("hello").unwrap(), Value::from("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct Import {
    resolve: Resolve,
}

impl Import {
    /// Creates an import over `container` with `aliases`.
    pub fn new<I, A>(container: &Container, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        Self {
            resolve: Resolve::build(container, aliases),
        }
    }

    /// Resolves `key` through the bound aliases.
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    #[inline]
    pub fn f(&self, key: &str) -> Result<Value> {
        self.resolve.resolve(key)
    }

    /// Same as [`f`](Self::f).
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    #[inline]
    pub fn resolve(&self, key: &str) -> Result<Value> {
        self.f(key)
    }

    /// The bound aliases in priority order.
    pub fn aliases(&self) -> &AliasTable {
        self.resolve.aliases()
    }
}

/// Gives a type an `f(key)` lookup backed by an [`Import`].
///
/// # Examples
///
/// ```rust
/// use funbox::container::{Import, Mixin};
/// use funbox::{Container, Value};
///
/// struct Calculator {
///     math: Import,
/// }
///
/// impl Mixin for Calculator {
///     fn import(&self) -> &Import {
///         &self.math
///     }
/// }
///
/// let container = Container::new();
/// container.define_value("app.math.answer", 42).unwrap();
///
/// let calculator = Calculator { math: container.import(["app.math"]) };
/// assert_eq!(calculator.f("answer").unwrap(), Value::Int(42));
/// ```
pub trait Mixin {
    /// The import backing [`f`](Self::f).
    fn import(&self) -> &Import;

    /// Resolves `key` through [`import`](Self::import).
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    fn f(&self, key: &str) -> Result<Value> {
        self.import().f(key)
    }
}
