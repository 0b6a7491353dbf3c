//! Operations on single lists.

use std::cmp::Ordering;

use crate::curry::Value;
use crate::error::{Error, Result};

/// `first(list)`: `Nil` for an empty list.
pub(super) fn first(arguments: &[Value]) -> Result<Value> {
    Ok(arguments[0].as_list()?.first().cloned().unwrap_or_default())
}

/// `last(list)`: `Nil` for an empty list.
pub(super) fn last(arguments: &[Value]) -> Result<Value> {
    Ok(arguments[0].as_list()?.last().cloned().unwrap_or_default())
}

/// `size(list)`.
pub(super) fn size(arguments: &[Value]) -> Result<Value> {
    Ok(Value::from(arguments[0].as_list()?.len()))
}

/// `join(separator, list)`: the elements' display forms joined by
/// `separator`.
pub(super) fn join(arguments: &[Value]) -> Result<Value> {
    let separator = arguments[0].as_str()?;
    let joined = arguments[1]
        .as_list()?
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator);
    Ok(Value::from(joined))
}

/// `min(list)`: `Nil` for an empty list.
pub(super) fn min(arguments: &[Value]) -> Result<Value> {
    extreme(arguments[0].as_list()?, Ordering::Less)
}

/// `max(list)`: `Nil` for an empty list.
pub(super) fn max(arguments: &[Value]) -> Result<Value> {
    extreme(arguments[0].as_list()?, Ordering::Greater)
}

/// Keeps the first element that no later element beats in direction
/// `wanted`.
fn extreme(items: &[Value], wanted: Ordering) -> Result<Value> {
    let mut items = items.iter();
    let Some(mut best) = items.next() else {
        return Ok(Value::Nil);
    };
    for item in items {
        if compare(item, best)? == wanted {
            best = item;
        }
    }
    Ok(best.clone())
}

/// Orders numbers numerically (integers widen to floats when mixed) and
/// strings lexically. Anything else is incomparable, and so is NaN.
fn compare(left: &Value, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Int(left), Value::Int(right)) => Ok(left.cmp(right)),
        (Value::Str(left), Value::Str(right)) => Ok(left.cmp(right)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => left
            .as_float()?
            .partial_cmp(&right.as_float()?)
            .ok_or_else(|| Error::failed("NaN cannot be ordered")),
        (Value::Int(_) | Value::Float(_) | Value::Str(_), other) => Err(incomparable(other)),
        (other, _) => Err(incomparable(other)),
    }
}

fn incomparable(value: &Value) -> Error {
    Error::TypeMismatch {
        expected: "comparable",
        found: value.type_name(),
    }
}
