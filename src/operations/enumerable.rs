//! Operations over lists.
//!
//! Maps are enumerated as `[key, value]` pairs in key order.

use std::slice;

use crate::curry::Value;
use crate::error::Result;

/// `all(predicate, list)`: `true` when the predicate is truthy for every
/// element, including the empty list.
pub(super) fn all(arguments: &[Value]) -> Result<Value> {
    let predicate = &arguments[0];
    for element in elements(&arguments[1])? {
        if !predicate.call(slice::from_ref(&element))?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// `map(function, list)`.
pub(super) fn map(arguments: &[Value]) -> Result<Value> {
    let function = &arguments[0];
    let mapped = elements(&arguments[1])?
        .iter()
        .map(|element| function.call(slice::from_ref(element)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::from(mapped))
}

/// `select(predicate, list)`: the elements the predicate keeps.
pub(super) fn select(arguments: &[Value]) -> Result<Value> {
    let predicate = &arguments[0];
    let mut selected = Vec::new();
    for element in elements(&arguments[1])? {
        if predicate.call(slice::from_ref(&element))?.is_truthy() {
            selected.push(element);
        }
    }
    Ok(Value::from(selected))
}

/// `reduce(function, accumulator, list)`: folds from the left, calling
/// `function(accumulator, element)`.
pub(super) fn reduce(arguments: &[Value]) -> Result<Value> {
    let function = &arguments[0];
    elements(&arguments[2])?
        .into_iter()
        .try_fold(arguments[1].clone(), |accumulator, element| {
            function.call(&[accumulator, element])
        })
}

/// `count(predicate, list)`: how many elements the predicate accepts.
pub(super) fn count(arguments: &[Value]) -> Result<Value> {
    let predicate = &arguments[0];
    let mut total = 0_usize;
    for element in elements(&arguments[1])? {
        if predicate.call(slice::from_ref(&element))?.is_truthy() {
            total += 1;
        }
    }
    Ok(Value::from(total))
}

fn elements(value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Map(entries) => Ok(entries
            .iter()
            .map(|(key, value)| Value::list([Value::from(key.as_str()), value.clone()]))
            .collect()),
        other => Ok(other.as_list()?.to_vec()),
    }
}
