//! # funbox
//!
//! Curried functions with placeholders, and a lazy, namespace-scoped
//! registry to keep them in.
//!
//! ## Overview
//!
//! - **Curry engine**: turn any [`Function`] into a curried one that
//!   accepts its arguments across several calls and lets [`__`] leave a
//!   slot open for later.
//! - **Function container**: a thread-safe [`Container`] mapping dotted
//!   keys such as `app.math.sum` to definitions that run on first fetch,
//!   exactly once.
//! - **Namespaces and aliases**: the [`Define`](container::Define) builder
//!   fills a container namespace by namespace; [`Resolve`](container::Resolve)
//!   and [`Import`](container::Import) look short keys up through aliases.
//! - **Operations**: a catalogue of curried built-ins for functions,
//!   lists, strings and maps.
//!
//! ## Feature Flags
//!
//! - `operations` (default): the built-in operation catalogue
//! - `serde`: `Serialize`/`Deserialize` for [`Config`](container::Config)
//! - `fxhash`: use `rustc-hash` for the registry map
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use funbox::prelude::*;
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
//!             })
//!         })
//!     })
//! })
//! .unwrap();
//!
//! let math = container.import(["app.math"]);
//! let sum = math.f("sum").unwrap();
//!
//! assert_eq!(call!(sum, 2, 3).unwrap(), Value::Int(5));
//!
//! let add_three = call!(sum, __, 3).unwrap();
//! assert_eq!(call!(add_three, 4).unwrap(), Value::Int(7));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use funbox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::container::{
        Alias, Config, Container, Define, Dsl, Import, Mixin, Resolve, define,
    };
    pub use crate::curry::{__, Arity, Function, Value, curry};
    pub use crate::error::{Error, Result};
    pub use crate::{args, call};

    #[cfg(feature = "operations")]
    pub use crate::operations::Operation;
}

pub mod container;
pub mod curry;
pub mod error;

#[cfg(feature = "operations")]
pub mod operations;

pub use container::Container;
pub use curry::{__, Arity, Function, NativeBody, Value, curry};
pub use error::{Error, Result};
