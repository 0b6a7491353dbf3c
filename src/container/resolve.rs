//! Alias-aware key resolution.

use super::Container;
use super::alias::{Alias, AliasTable};
use crate::curry::Value;
use crate::error::{Error, Result};

/// Resolves short keys against a container through an [`AliasTable`].
///
/// Candidates are probed in alias priority order and the first key that
/// exists wins. The raw key is tried last. A missing candidate is skipped;
/// every other error, including failures inside a definition, is returned
/// immediately.
///
/// # Examples
///
/// ```rust
/// use funbox::container::{Container, Resolve};
/// use funbox::{Error, Value};
///
/// let container = Container::new();
/// container.define_value("core.app.math.map", "map").unwrap();
///
/// let resolve = Resolve::build(&container, [("app.math", "m")]);
/// assert_eq!(resolve.resolve("core.m.map").unwrap(), Value::from("map"));
/// assert_eq!(resolve.resolve("mango"), Err(Error::key_not_found("mango")));
/// ```
#[derive(Debug, Clone)]
pub struct Resolve {
    aliases: AliasTable,
    container: Container,
}

impl Resolve {
    /// Creates a resolver over `container` without aliases.
    pub fn new(container: &Container) -> Self {
        Self::from_table(container, AliasTable::default())
    }

    /// Creates a resolver over `container` with `aliases`.
    pub fn build<I, A>(container: &Container, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        Self::from_table(container, AliasTable::new(aliases))
    }

    /// Creates a resolver from an already normalized table.
    pub fn from_table(container: &Container, aliases: AliasTable) -> Self {
        Self {
            aliases,
            container: container.clone(),
        }
    }

    /// The aliases in priority order.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The container this resolver reads from.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Resolves `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] naming `key` when no candidate is defined
    /// - any other error raised while evaluating the matching definition
    pub fn resolve(&self, key: &str) -> Result<Value> {
        for candidate in self.aliases.candidates(key) {
            tracing::trace!(key, candidate = %candidate, "probing alias candidate");
            match self.container.fetch(&candidate) {
                Err(error) if error.is_missing(&candidate) => {}
                outcome => return outcome,
            }
        }

        tracing::trace!(key, "probing raw key");
        match self.container.fetch(key) {
            Err(error) if error.is_missing(key) => Err(Error::key_not_found(key)),
            outcome => outcome,
        }
    }

    /// Shorthand for [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    #[inline]
    pub fn f(&self, key: &str) -> Result<Value> {
        self.resolve(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn container() -> Container {
        let container = Container::new();
        container.define_value("app.math.map", "outer").unwrap();
        container.define_value("app.math.inner.map", "inner").unwrap();
        container
    }

    #[rstest]
    fn later_alias_is_probed_first(container: Container) {
        let resolve = Resolve::build(&container, [("app.math", "m"), ("app.math.inner", "m")]);

        assert_eq!(resolve.resolve("m.map").unwrap(), Value::from("inner"));
    }

    #[rstest]
    fn earlier_alias_is_used_when_later_misses(container: Container) {
        container.define_value("app.math.sum", "sum").unwrap();
        let resolve = Resolve::build(&container, [("app.math", "m"), ("app.math.inner", "m")]);

        assert_eq!(resolve.resolve("m.sum").unwrap(), Value::from("sum"));
    }

    #[rstest]
    fn nested_missing_key_is_not_swallowed(container: Container) {
        let inner = container.clone();
        container
            .define("app.broken", move || inner.fetch("does.not.exist"))
            .unwrap();
        container.define_value("broken", "raw").unwrap();
        let resolve = Resolve::build(&container, ["app"]);

        assert_eq!(
            resolve.resolve("broken"),
            Err(Error::key_not_found("does.not.exist"))
        );
    }

    #[rstest]
    fn raw_key_is_the_fallback(container: Container) {
        let resolve = Resolve::build(&container, ["lib"]);

        assert_eq!(resolve.resolve("app.math.map").unwrap(), Value::from("outer"));
    }
}
