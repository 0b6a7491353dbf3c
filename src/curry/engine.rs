//! The placeholder-aware curry engine.
//!
//! A curried function keeps an immutable list of argument slots. Every
//! call merges the new arguments into a fresh copy of that list, so partial
//! applications held by different owners never observe each other.

use std::sync::Arc;

use smallvec::SmallVec;

use super::function::{Function, Native};
use super::value::Value;
use crate::error::Result;

type Slots = SmallVec<[Value; 6]>;

/// Returns the curried form of `function`.
///
/// The curried function can be called with any number of arguments at a
/// time. [`__`](crate::__) reserves a slot to be filled by a later call.
/// Once every slot is concrete and the arity is met, the underlying
/// function runs; a function returned from it is curried in turn.
///
/// # Examples
///
/// ```rust
/// use funbox::{Function, Value, args, curry, __};
///
/// let build = Function::native("build", funbox::Arity::Exact(3), |arguments| {
///     Ok(Value::list(arguments.iter().cloned()))
/// });
/// let curried = curry(&build);
/// let expected = Value::list(args![1, 2, 3]);
///
/// assert_eq!(curried.call(&args![1, 2, 3]).unwrap(), expected);
///
/// let step = curried.call(&args![__, 2]).unwrap();
/// let step = step.call(&args![__, 3]).unwrap();
/// assert_eq!(step.call(&args![1]).unwrap(), expected);
///
/// let step = curried.call(&args![__, __, 3]).unwrap();
/// let step = step.call(&args![__, 2]).unwrap();
/// assert_eq!(step.call(&args![1]).unwrap(), expected);
/// ```
pub fn curry(function: &Function) -> Function {
    if function.is_curried() {
        return function.clone();
    }
    Function::from_parts(Arc::clone(function.target()), Arc::from(Vec::new()))
}

/// Merges `arguments` into a copy of `saved`.
///
/// Each argument, placeholder or not, takes the first open slot at or
/// after the cursor and moves the cursor past it. With no open slot left
/// the argument is appended.
pub(crate) fn merge(saved: &[Value], arguments: &[Value]) -> Slots {
    let mut merged: Slots = saved.iter().cloned().collect();
    let mut cursor = 0;

    for argument in arguments {
        let open = merged[cursor..]
            .iter()
            .position(Value::is_placeholder)
            .map(|offset| cursor + offset);

        if let Some(index) = open {
            merged[index] = argument.clone();
            cursor = index + 1;
        } else {
            merged.push(argument.clone());
            cursor = merged.len();
        }
    }

    merged
}

pub(super) fn apply(
    target: &Arc<Native>,
    saved: &Arc<[Value]>,
    arguments: &[Value],
) -> Result<Value> {
    let merged = merge(saved, arguments);

    if target.arity.is_exceeded_by(merged.len()) {
        return Err(target.arity_error(merged.len()));
    }

    if merged.iter().any(Value::is_placeholder) || merged.len() < target.arity.required() {
        let slots: Arc<[Value]> = merged.into_iter().collect();
        return Ok(Value::Function(Function::from_parts(
            Arc::clone(target),
            slots,
        )));
    }

    match target.invoke(&merged)? {
        Value::Function(returned) => Ok(Value::Function(curry(&returned))),
        value => Ok(value),
    }
}
