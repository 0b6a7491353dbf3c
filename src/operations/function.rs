//! Operations on functions: composition, currying and argument plumbing.

use crate::curry::{Arity, Function, Value};
use crate::error::Result;

/// `compose(f, g, ...)`: right-to-left composition.
///
/// The last function receives the call's arguments; each earlier one
/// receives the previous result.
pub(super) fn compose(arguments: &[Value]) -> Result<Value> {
    let mut functions = functions(arguments)?;
    functions.reverse();
    Ok(chain("compose", functions).into())
}

/// `pipe(f, g, ...)`: left-to-right composition.
pub(super) fn pipe(arguments: &[Value]) -> Result<Value> {
    Ok(chain("pipe", functions(arguments)?).into())
}

/// `curry(f)`: the curried form of `f`.
pub(super) fn curry(arguments: &[Value]) -> Result<Value> {
    Ok(arguments[0].as_function()?.curried().into())
}

/// `identity(x)`.
pub(super) fn identity(arguments: &[Value]) -> Result<Value> {
    Ok(arguments[0].clone())
}

/// `constant(x)`: a function ignoring its arguments and returning `x`.
pub(super) fn constant(arguments: &[Value]) -> Result<Value> {
    let value = arguments[0].clone();
    Ok(Function::native("constant", Arity::AtLeast(0), move |_| Ok(value.clone())).into())
}

/// `flip(f)`: `f` with its first two arguments swapped.
pub(super) fn flip(arguments: &[Value]) -> Result<Value> {
    let function = arguments[0].as_function()?.clone();
    let arity = match function.arity() {
        Arity::Exact(count) => Arity::Exact(count.max(2)),
        Arity::AtLeast(count) => Arity::AtLeast(count.max(2)),
    };
    let flipped = Function::native(format!("flip({})", function.name()), arity, move |arguments| {
        let mut swapped = arguments.to_vec();
        swapped.swap(0, 1);
        function.call(&swapped)
    });
    Ok(flipped.into())
}

fn functions(arguments: &[Value]) -> Result<Vec<Function>> {
    arguments
        .iter()
        .map(|argument| argument.as_function().cloned())
        .collect()
}

/// Chains `functions` in call order. The chain takes the arity of the
/// function called first.
fn chain(name: &str, functions: Vec<Function>) -> Function {
    let arity = functions
        .first()
        .map_or(Arity::AtLeast(0), Function::arity);
    let name = format!(
        "{name}({})",
        functions.iter().map(Function::name).collect::<Vec<_>>().join(", ")
    );

    Function::native(name, arity, move |arguments| {
        let mut functions = functions.iter();
        let Some(first) = functions.next() else {
            return Ok(arguments.first().cloned().unwrap_or_default());
        };
        functions.try_fold(first.call(arguments)?, |result, function| {
            function.call(std::slice::from_ref(&result))
        })
    })
}
