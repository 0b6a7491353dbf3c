//! The nested namespace builder used to fill a container.

use std::panic::Location;

use super::alias::AliasTable;
use super::resolve::Resolve;
use super::{Container, NAMESPACE_SEPARATOR, WeakContainer};
use crate::curry::Value;
use crate::error::{Error, Result};

/// Registers definitions under an accumulated namespace path.
///
/// Each builder carries the target container, its namespace path and a
/// [`Resolve`] scoped to every prefix of that path, deepest first. Inside
/// `app.math`, the short key `sum` is tried as `app.math.sum`, then
/// `app.sum`, then `sum`.
///
/// Definition blocks are stored as thunks and run on first fetch, so a
/// block may refer to keys that are defined later in the same `define`
/// call, or even later still.
///
/// # Examples
///
/// ```rust
/// use funbox::container::{Container, Define};
/// use funbox::Value;
///
/// let container = Container::new();
///
/// Define::build(&container)
///     .call(|root| {
///         root.namespace("app", |app| {
///             app.f("greeting", |scope| scope.resolve("name"))?;
///             app.f("name", |_| Ok(Value::from("funbox")))
///         })
///     })
///     .unwrap();
///
/// assert_eq!(container.fetch("app.greeting").unwrap(), Value::from("funbox"));
/// ```
#[derive(Debug, Clone)]
pub struct Define {
    container: Container,
    namespaces: Vec<String>,
    resolve: Resolve,
}

impl Define {
    /// Creates a builder at the root of `container`.
    pub fn build(container: &Container) -> Self {
        Self::scoped(container, Vec::new())
    }

    /// Creates a builder nested under `namespaces`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] when a namespace is empty or
    /// has an empty dotted segment.
    pub fn with_namespaces<I, S>(container: &Container, namespaces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Vec::new();
        for namespace in namespaces {
            path.extend(split_namespace(&namespace.into())?);
        }
        Ok(Self::scoped(container, path))
    }

    fn scoped(container: &Container, namespaces: Vec<String>) -> Self {
        let resolve = Resolve::from_table(container, AliasTable::scoped(&namespaces));
        Self {
            container: container.clone(),
            namespaces,
            resolve,
        }
    }

    /// Runs `block` against this builder.
    ///
    /// # Errors
    ///
    /// Returns whatever `block` returns.
    pub fn call<F>(&self, block: F) -> Result<()>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        block(self)
    }

    /// Runs `block` against a builder nested one namespace deeper.
    ///
    /// A dotted `name` such as `app.math` opens every segment at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for an empty name or segment,
    /// otherwise whatever `block` returns.
    pub fn namespace<F>(&self, name: impl Into<String>, block: F) -> Result<()>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        let mut namespaces = self.namespaces.clone();
        namespaces.extend(split_namespace(&name.into())?);
        block(&Self::scoped(&self.container, namespaces))
    }

    /// Registers `block` under `name` in the current namespace.
    ///
    /// The block receives a [`Resolve`] scoped like this builder's. It does
    /// not run now; it runs when the key is first fetched.
    ///
    /// # Errors
    ///
    /// Fails like [`Container::define`].
    pub fn function<F>(&self, name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&Resolve) -> Result<Value> + Send + 'static,
    {
        let full_key = self.key_for(name);
        let aliases = self.resolve.aliases().clone();
        let container = self.container.downgrade();
        let key = full_key.clone();

        self.container.define(full_key, move || {
            let container = live_container(&container, &key)?;
            block(&Resolve::from_table(&container, aliases))
        })
    }

    /// Shorthand for [`function`](Self::function).
    ///
    /// # Errors
    ///
    /// Same as [`function`](Self::function).
    #[inline]
    pub fn f<F>(&self, name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&Resolve) -> Result<Value> + Send + 'static,
    {
        self.function(name, block)
    }

    /// Looks `key` up through this builder's scoped resolver.
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    pub fn get(&self, key: &str) -> Result<Value> {
        self.resolve.resolve(key)
    }

    /// Same as [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Same as [`Resolve::resolve`].
    #[inline]
    pub fn resolve(&self, key: &str) -> Result<Value> {
        self.get(key)
    }

    /// The resolver scoped to this builder's namespace path.
    pub fn resolver(&self) -> &Resolve {
        &self.resolve
    }

    /// The namespace path of this builder.
    pub fn path(&self) -> &[String] {
        &self.namespaces
    }

    /// The fully qualified key `name` would be registered under.
    pub fn key_for(&self, name: &str) -> String {
        if self.namespaces.is_empty() {
            return name.to_string();
        }
        format!(
            "{}{NAMESPACE_SEPARATOR}{name}",
            self.namespaces.join(NAMESPACE_SEPARATOR)
        )
    }
}

/// Runs `block` against a root builder for `container`.
///
/// The source file this is called from is marked loaded in the
/// container's [`definition_paths`](Container::definition_paths).
///
/// # Errors
///
/// Returns whatever `block` returns.
///
/// # Examples
///
/// ```rust
/// use funbox::container::{Container, define};
/// use funbox::Value;
///
/// let container = Container::new();
/// define(&container, |root| root.f("answer", |_| Ok(Value::Int(42)))).unwrap();
///
/// assert_eq!(container.fetch("answer").unwrap(), Value::Int(42));
/// ```
#[track_caller]
pub fn define<F>(container: &Container, block: F) -> Result<()>
where
    F: FnOnce(&Define) -> Result<()>,
{
    container
        .definition_paths()
        .mark_loaded(Location::caller().file());
    Define::build(container).call(block)
}

/// A dropped container is reported as a failure, never as a missing key,
/// so a resolver probing candidates cannot skip over it.
fn live_container(container: &WeakContainer, key: &str) -> Result<Container> {
    container
        .upgrade()
        .ok_or_else(|| Error::failed(format!("container of {key:?} was dropped")))
}

fn split_namespace(name: &str) -> Result<Vec<String>> {
    if name.is_empty() || name.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
        return Err(Error::invalid_definition(
            name,
            "namespace must be a non-empty dotted name",
        ));
    }
    Ok(name.split(NAMESPACE_SEPARATOR).map(str::to_string).collect())
}
