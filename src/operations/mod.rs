//! Built-in curried operations.
//!
//! Every operation is a native function wrapped by [`curry`](crate::curry),
//! so it accepts its arguments across several calls and understands the
//! [`__`](crate::__) placeholder. Operations are grouped by the kind of
//! value they work on, and each has a dotted registry key:
//!
//! | Group      | Operations                                                   |
//! |------------|--------------------------------------------------------------|
//! | `function` | `compose`, `pipe`, `curry`, `identity`, `constant`, `flip`   |
//! | `enum`     | `all`, `map`, `select`, `reduce`, `count`                    |
//! | `array`    | `first`, `last`, `size`, `join`, `min`, `max`                |
//! | `string`   | `strip`, `size`, `capitalize`                                |
//! | `hash`     | `get`, `fetch`, `fetch_with`, `put`                          |
//!
//! [`install`] registers all of them in a container.
//!
//! # Examples
//!
//! ```rust
//! use funbox::operations::{self, Operation};
//! use funbox::{Container, Value, call};
//!
//! let container = Container::new();
//! operations::install(&container).unwrap();
//!
//! let strings = container.import(["string"]);
//! let capitalize = strings.f("capitalize").unwrap();
//! assert_eq!(call!(capitalize, "hello").unwrap(), Value::from("Hello"));
//!
//! let join = Operation::ArrayJoin.function();
//! let with_commas = call!(join, ", ").unwrap();
//! let list = Value::list([Value::Int(1), Value::Int(2)]);
//! assert_eq!(call!(with_commas, list).unwrap(), Value::from("1, 2"));
//! ```

mod array;
mod enumerable;
mod function;
mod hash;
mod string;

use std::fmt;

use crate::container::Container;
use crate::curry::{Arity, Function, Value};
use crate::error::Result;

type Body = fn(&[Value]) -> Result<Value>;

/// A built-in operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `function.compose`
    FunctionCompose,
    /// `function.pipe`
    FunctionPipe,
    /// `function.curry`
    FunctionCurry,
    /// `function.identity`
    FunctionIdentity,
    /// `function.constant`
    FunctionConstant,
    /// `function.flip`
    FunctionFlip,
    /// `enum.all`
    EnumAll,
    /// `enum.map`
    EnumMap,
    /// `enum.select`
    EnumSelect,
    /// `enum.reduce`
    EnumReduce,
    /// `enum.count`
    EnumCount,
    /// `array.first`
    ArrayFirst,
    /// `array.last`
    ArrayLast,
    /// `array.size`
    ArraySize,
    /// `array.join`
    ArrayJoin,
    /// `array.min`
    ArrayMin,
    /// `array.max`
    ArrayMax,
    /// `string.strip`
    StringStrip,
    /// `string.size`
    StringSize,
    /// `string.capitalize`
    StringCapitalize,
    /// `hash.get`
    HashGet,
    /// `hash.fetch`
    HashFetch,
    /// `hash.fetch_with`
    HashFetchWith,
    /// `hash.put`
    HashPut,
}

impl Operation {
    /// Every operation, in registration order.
    pub const ALL: [Self; 24] = [
        Self::FunctionCompose,
        Self::FunctionPipe,
        Self::FunctionCurry,
        Self::FunctionIdentity,
        Self::FunctionConstant,
        Self::FunctionFlip,
        Self::EnumAll,
        Self::EnumMap,
        Self::EnumSelect,
        Self::EnumReduce,
        Self::EnumCount,
        Self::ArrayFirst,
        Self::ArrayLast,
        Self::ArraySize,
        Self::ArrayJoin,
        Self::ArrayMin,
        Self::ArrayMax,
        Self::StringStrip,
        Self::StringSize,
        Self::StringCapitalize,
        Self::HashGet,
        Self::HashFetch,
        Self::HashFetchWith,
        Self::HashPut,
    ];

    /// The registry key, e.g. `array.join`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FunctionCompose => "function.compose",
            Self::FunctionPipe => "function.pipe",
            Self::FunctionCurry => "function.curry",
            Self::FunctionIdentity => "function.identity",
            Self::FunctionConstant => "function.constant",
            Self::FunctionFlip => "function.flip",
            Self::EnumAll => "enum.all",
            Self::EnumMap => "enum.map",
            Self::EnumSelect => "enum.select",
            Self::EnumReduce => "enum.reduce",
            Self::EnumCount => "enum.count",
            Self::ArrayFirst => "array.first",
            Self::ArrayLast => "array.last",
            Self::ArraySize => "array.size",
            Self::ArrayJoin => "array.join",
            Self::ArrayMin => "array.min",
            Self::ArrayMax => "array.max",
            Self::StringStrip => "string.strip",
            Self::StringSize => "string.size",
            Self::StringCapitalize => "string.capitalize",
            Self::HashGet => "hash.get",
            Self::HashFetch => "hash.fetch",
            Self::HashFetchWith => "hash.fetch_with",
            Self::HashPut => "hash.put",
        }
    }

    /// The declared arity of the underlying function.
    pub const fn arity(self) -> Arity {
        match self {
            Self::FunctionCompose | Self::FunctionPipe => Arity::AtLeast(1),
            Self::FunctionCurry
            | Self::FunctionIdentity
            | Self::FunctionConstant
            | Self::FunctionFlip
            | Self::ArrayFirst
            | Self::ArrayLast
            | Self::ArraySize
            | Self::ArrayMin
            | Self::ArrayMax
            | Self::StringStrip
            | Self::StringSize
            | Self::StringCapitalize => Arity::Exact(1),
            Self::EnumAll
            | Self::EnumMap
            | Self::EnumSelect
            | Self::EnumCount
            | Self::ArrayJoin
            | Self::HashGet
            | Self::HashFetch => Arity::Exact(2),
            Self::EnumReduce | Self::HashFetchWith | Self::HashPut => Arity::Exact(3),
        }
    }

    const fn body(self) -> Body {
        match self {
            Self::FunctionCompose => function::compose,
            Self::FunctionPipe => function::pipe,
            Self::FunctionCurry => function::curry,
            Self::FunctionIdentity => function::identity,
            Self::FunctionConstant => function::constant,
            Self::FunctionFlip => function::flip,
            Self::EnumAll => enumerable::all,
            Self::EnumMap => enumerable::map,
            Self::EnumSelect => enumerable::select,
            Self::EnumReduce => enumerable::reduce,
            Self::EnumCount => enumerable::count,
            Self::ArrayFirst => array::first,
            Self::ArrayLast => array::last,
            Self::ArraySize => array::size,
            Self::ArrayJoin => array::join,
            Self::ArrayMin => array::min,
            Self::ArrayMax => array::max,
            Self::StringStrip => string::strip,
            Self::StringSize => string::size,
            Self::StringCapitalize => string::capitalize,
            Self::HashGet => hash::get,
            Self::HashFetch => hash::fetch,
            Self::HashFetchWith => hash::fetch_with,
            Self::HashPut => hash::put,
        }
    }

    /// Looks an operation up by its registry key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use funbox::operations::Operation;
    ///
    /// assert_eq!(Operation::from_key("hash.get"), Some(Operation::HashGet));
    /// assert_eq!(Operation::from_key("hash.missing"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.key() == key)
    }

    /// The operation as a curried function.
    pub fn function(self) -> Function {
        Function::native(self.key(), self.arity(), self.body()).curried()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

/// Registers every operation in `container` under its key.
///
/// # Errors
///
/// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) when a key
/// is already taken and the container does not allow overrides.
pub fn install(container: &Container) -> Result<()> {
    for operation in Operation::ALL {
        container.define_value(operation.key(), operation.function())?;
    }
    tracing::debug!(count = Operation::ALL.len(), "installed built-in operations");
    Ok(())
}
