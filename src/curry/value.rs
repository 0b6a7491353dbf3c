//! The dynamically typed value passed through curried functions and
//! stored in containers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::function::Function;
use crate::error::{Error, Result};

/// A dynamically typed value.
///
/// Payloads are reference counted, so cloning a `Value` is cheap and the
/// value can be shared between threads.
///
/// [`Value::Placeholder`] marks an argument that has not been supplied yet.
/// It is exported as [`__`](crate::__) and is distinct from every other
/// variant, including `Nil`, `Bool(false)` and `Int(0)`.
///
/// # Examples
///
/// ```rust
/// use funbox::{Value, __};
///
/// assert!(__.is_placeholder());
/// assert!(!Value::Nil.is_placeholder());
/// assert_ne!(__, Value::Bool(false));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    Str(Arc<str>),
    /// An immutable list.
    List(Arc<Vec<Value>>),
    /// An immutable map with string keys.
    Map(Arc<BTreeMap<String, Value>>),
    /// A callable.
    Function(Function),
    /// An argument slot that is still open.
    Placeholder,
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);

impl Value {
    /// Returns the variant name, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Function(_) => "function",
            Self::Placeholder => "placeholder",
        }
    }

    /// Returns `true` for the placeholder.
    #[inline]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Returns `true` unless the value is `Nil` or `Bool(false)`.
    #[inline]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Returns `true` for `Nil`.
    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Builds a list value.
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::List(Arc::new(items.into_iter().collect()))
    }

    /// Builds a map value.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Map(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    fn mismatch<T>(&self, expected: &'static str) -> Result<T> {
        Err(Error::TypeMismatch {
            expected,
            found: self.type_name(),
        })
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(*value),
            other => other.mismatch("bool"),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(value) => Ok(*value),
            other => other.mismatch("int"),
        }
    }

    /// Returns the number as a float, widening integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for non-numeric variants.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Self::Float(value) => Ok(*value),
            Self::Int(value) => Ok(*value as f64),
            other => other.mismatch("float"),
        }
    }

    /// Returns the string payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Self::Str(value) => Ok(value),
            other => other.mismatch("string"),
        }
    }

    /// Returns the list payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_list(&self) -> Result<&[Self]> {
        match self {
            Self::List(items) => Ok(items),
            other => other.mismatch("list"),
        }
    }

    /// Returns the map payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_map(&self) -> Result<&BTreeMap<String, Self>> {
        match self {
            Self::Map(entries) => Ok(entries),
            other => other.mismatch("map"),
        }
    }

    /// Returns the function payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other variant.
    pub fn as_function(&self) -> Result<&Function> {
        match self {
            Self::Function(function) => Ok(function),
            other => other.mismatch("function"),
        }
    }

    /// Calls the value as a function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value is not a function, or
    /// whatever the function itself returns.
    pub fn call(&self, arguments: &[Self]) -> Result<Self> {
        self.as_function()?.call(arguments)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) | (Self::Placeholder, Self::Placeholder) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => formatter.write_str("Nil"),
            Self::Bool(value) => write!(formatter, "Bool({value})"),
            Self::Int(value) => write!(formatter, "Int({value})"),
            Self::Float(value) => write!(formatter, "Float({value})"),
            Self::Str(value) => write!(formatter, "Str({value:?})"),
            Self::List(items) => formatter.debug_list().entries(items.iter()).finish(),
            Self::Map(entries) => formatter.debug_map().entries(entries.iter()).finish(),
            Self::Function(function) => write!(formatter, "{function:?}"),
            Self::Placeholder => formatter.write_str("__"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => Ok(()),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Str(value) => formatter.write_str(value),
            other => write!(formatter, "{other:?}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Nil
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(Arc::new(items))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
