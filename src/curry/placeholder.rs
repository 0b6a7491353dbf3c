//! The placeholder token and the argument-building macros.

use super::value::Value;

/// The placeholder for an argument that will be supplied later.
///
/// Pass it wherever a curried function expects an argument you do not
/// have yet. The next call fills open slots in the order they were
/// reserved.
///
/// Note: This is named `__` (double underscore), the same spelling the
/// `partial!` family of macros uses, because `_` is not a valid
/// identifier.
///
/// # Examples
///
/// ```rust
/// use funbox::{Function, Value, args, __};
///
/// let divide = Function::from_fn2("divide", |numerator, denominator| {
///     Ok(Value::Float(numerator.as_float()? / denominator.as_float()?))
/// })
/// .curried();
///
/// let half = divide.call(&args![__, 2.0]).unwrap();
/// assert_eq!(half.call(&args![10.0]).unwrap(), Value::Float(5.0));
/// ```
#[allow(non_upper_case_globals)]
pub const __: Value = Value::Placeholder;

/// Builds a `Vec<Value>` converting every element with `Value::from`.
///
/// # Examples
///
/// ```rust
/// use funbox::{Value, args, __};
///
/// let arguments = args![1, "two", __, true];
/// assert_eq!(arguments[0], Value::Int(1));
/// assert_eq!(arguments[1], Value::from("two"));
/// assert!(arguments[2].is_placeholder());
/// assert_eq!(arguments[3], Value::Bool(true));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($argument:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($argument)),+]
    };
}

/// Calls a [`Function`](crate::Function) or a function [`Value`] with
/// arguments converted by [`args!`](crate::args).
///
/// # Examples
///
/// ```rust
/// use funbox::{Function, Value, call, __};
///
/// let concat = Function::from_fn2("concat", |left, right| {
///     Ok(Value::from(format!("{}{}", left.as_str()?, right.as_str()?)))
/// })
/// .curried();
///
/// let greet = call!(concat, "Hello, ", __).unwrap();
/// assert_eq!(call!(greet, "World").unwrap(), Value::from("Hello, World"));
/// ```
#[macro_export]
macro_rules! call {
    ($function:expr $(, $argument:expr)* $(,)?) => {
        $function.call(&$crate::args![$($argument),*])
    };
}
