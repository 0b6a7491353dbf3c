//! Callable values: native functions and their curried wrappers.

use std::fmt;
use std::sync::Arc;

use super::engine;
use super::value::Value;
use crate::error::{Error, Result};

/// The body of a native function.
pub type NativeBody = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// How many arguments a function declares.
///
/// # Examples
///
/// ```rust
/// use funbox::Arity;
///
/// assert!(Arity::Exact(2).accepts(2));
/// assert!(!Arity::Exact(2).accepts(3));
/// assert!(Arity::AtLeast(1).accepts(4));
/// assert_eq!(Arity::AtLeast(1).to_string(), "1+");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// The number of arguments needed before the function can run.
    #[inline]
    pub const fn required(self) -> usize {
        match self {
            Self::Exact(count) | Self::AtLeast(count) => count,
        }
    }

    /// Returns `true` when `given` arguments satisfy the arity.
    #[inline]
    pub const fn accepts(self, given: usize) -> bool {
        match self {
            Self::Exact(count) => given == count,
            Self::AtLeast(count) => given >= count,
        }
    }

    /// Returns `true` when `given` arguments can never satisfy the arity.
    #[inline]
    pub const fn is_exceeded_by(self, given: usize) -> bool {
        match self {
            Self::Exact(count) => given > count,
            Self::AtLeast(_) => false,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(count) => write!(formatter, "{count}"),
            Self::AtLeast(count) => write!(formatter, "{count}+"),
        }
    }
}

pub(super) struct Native {
    pub(super) name: Arc<str>,
    pub(super) arity: Arity,
    body: Box<NativeBody>,
}

impl Native {
    pub(super) fn invoke(&self, arguments: &[Value]) -> Result<Value> {
        if !self.arity.accepts(arguments.len()) {
            return Err(self.arity_error(arguments.len()));
        }
        (self.body)(arguments)
    }

    pub(super) fn arity_error(&self, given: usize) -> Error {
        Error::Arity {
            function: self.name.to_string(),
            expected: self.arity.to_string(),
            given,
        }
    }
}

enum Kind {
    Native(Arc<Native>),
    Curried {
        target: Arc<Native>,
        slots: Arc<[Value]>,
    },
}

/// A shareable callable.
///
/// A function is either *native* (a Rust closure with a declared
/// [`Arity`]) or *curried*. Native functions check their arity strictly
/// and know nothing about placeholders. Curried functions accept their
/// arguments in any number of calls and understand [`__`](crate::__);
/// see [`curry`](crate::curry).
///
/// Cloning is cheap. Two `Function` values are equal only when they are
/// the same function.
///
/// # Examples
///
/// ```rust
/// use funbox::{Function, Value, args, __};
///
/// let subtract = Function::from_fn2("subtract", |left, right| {
///     Ok(Value::Int(left.as_int()? - right.as_int()?))
/// })
/// .curried();
///
/// let from_ten = subtract.call(&args![10]).unwrap();
/// assert_eq!(from_ten.call(&args![3]).unwrap(), Value::Int(7));
///
/// let minus_three = subtract.call(&args![__, 3]).unwrap();
/// assert_eq!(minus_three.call(&args![10]).unwrap(), Value::Int(7));
/// ```
#[derive(Clone)]
pub struct Function {
    kind: Arc<Kind>,
}

impl Function {
    /// Creates a native function from a slice-taking body.
    pub fn native<F>(name: impl Into<Arc<str>>, arity: Arity, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            kind: Arc::new(Kind::Native(Arc::new(Native {
                name: name.into(),
                arity,
                body: Box::new(body),
            }))),
        }
    }

    /// Creates a native function taking no arguments.
    pub fn from_fn0<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self::native(name, Arity::Exact(0), move |_| body())
    }

    /// Creates a native function taking one argument.
    pub fn from_fn1<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::native(name, Arity::Exact(1), move |arguments| body(&arguments[0]))
    }

    /// Creates a native function taking two arguments.
    pub fn from_fn2<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::native(name, Arity::Exact(2), move |arguments| {
            body(&arguments[0], &arguments[1])
        })
    }

    /// Creates a native function taking three arguments.
    pub fn from_fn3<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::native(name, Arity::Exact(3), move |arguments| {
            body(&arguments[0], &arguments[1], &arguments[2])
        })
    }

    pub(super) fn from_parts(target: Arc<Native>, slots: Arc<[Value]>) -> Self {
        Self {
            kind: Arc::new(Kind::Curried { target, slots }),
        }
    }

    pub(super) fn target(&self) -> &Arc<Native> {
        match &*self.kind {
            Kind::Native(native) | Kind::Curried { target: native, .. } => native,
        }
    }

    /// The name the function was created with.
    pub fn name(&self) -> &str {
        &self.target().name
    }

    /// The declared arity of the underlying native function.
    pub fn arity(&self) -> Arity {
        self.target().arity
    }

    /// Returns `true` for curried functions.
    pub fn is_curried(&self) -> bool {
        matches!(&*self.kind, Kind::Curried { .. })
    }

    /// The argument slots bound so far (always empty for native functions).
    pub fn slots(&self) -> &[Value] {
        match &*self.kind {
            Kind::Native(_) => &[],
            Kind::Curried { slots, .. } => slots,
        }
    }

    /// Number of bound slots still holding a placeholder.
    pub fn open_slots(&self) -> usize {
        self.slots().iter().filter(|slot| slot.is_placeholder()).count()
    }

    /// Returns the curried form of this function.
    ///
    /// Currying a curried function returns it unchanged.
    pub fn curried(&self) -> Self {
        engine::curry(self)
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] when too many arguments are supplied (or,
    /// for native functions, any count other than the declared one), and
    /// propagates every error raised by the function body.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        match &*self.kind {
            Kind::Native(native) => native.invoke(arguments),
            Kind::Curried { target, slots } => engine::apply(target, slots, arguments),
        }
    }

    /// Returns `true` when both handles point to the same function.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            Kind::Native(native) => {
                write!(formatter, "<function {}/{}>", native.name, native.arity)
            }
            Kind::Curried { target, slots } => {
                write!(formatter, "<curried {}/{} {:?}>", target.name, target.arity, slots)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn add() -> Function {
        Function::from_fn2("add", |left, right| {
            Ok(Value::Int(left.as_int()? + right.as_int()?))
        })
    }

    #[rstest]
    fn native_call_checks_arity_strictly() {
        let add = add();

        assert_eq!(add.call(&[Value::Int(1), Value::Int(2)]), Ok(Value::Int(3)));
        assert!(matches!(
            add.call(&[Value::Int(1)]),
            Err(Error::Arity { given: 1, .. })
        ));
    }

    #[rstest]
    fn native_does_not_interpret_placeholders() {
        let add = add();
        let error = add.call(&[Value::Placeholder, Value::Int(2)]).unwrap_err();

        assert!(matches!(error, Error::TypeMismatch { found: "placeholder", .. }));
    }

    #[rstest]
    fn curried_reports_metadata_of_target() {
        let curried = add().curried();

        assert!(curried.is_curried());
        assert_eq!(curried.name(), "add");
        assert_eq!(curried.arity(), Arity::Exact(2));
        assert!(curried.slots().is_empty());
    }

    #[rstest]
    fn equality_is_identity() {
        let first = add();
        let second = add();

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[rstest]
    fn debug_shows_name_and_arity() {
        assert_eq!(format!("{:?}", add()), "<function add/2>");
    }
}
