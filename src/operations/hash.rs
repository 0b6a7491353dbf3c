//! Operations on maps.
//!
//! Maps are persistent: `put` returns a new map and leaves its input alone.

use std::slice;
use std::sync::Arc;

use crate::curry::Value;
use crate::error::{Error, Result};

/// `get(key, map)`: `Nil` when the key is absent.
pub(super) fn get(arguments: &[Value]) -> Result<Value> {
    let key = arguments[0].as_str()?;
    Ok(arguments[1].as_map()?.get(key).cloned().unwrap_or_default())
}

/// `fetch(key, map)`: fails when the key is absent.
pub(super) fn fetch(arguments: &[Value]) -> Result<Value> {
    let key = arguments[0].as_str()?;
    arguments[1]
        .as_map()?
        .get(key)
        .cloned()
        .ok_or_else(|| Error::key_not_found(key))
}

/// `fetch_with(key, fallback, map)`: when the key is absent, returns the
/// fallback, calling it with the key first if it is a function.
pub(super) fn fetch_with(arguments: &[Value]) -> Result<Value> {
    let key = &arguments[0];
    let fallback = &arguments[1];
    match arguments[2].as_map()?.get(key.as_str()?) {
        Some(value) => Ok(value.clone()),
        None if matches!(fallback, Value::Function(_)) => fallback.call(slice::from_ref(key)),
        None => Ok(fallback.clone()),
    }
}

/// `put(key, value, map)`: a copy of `map` with `key` set to `value`.
pub(super) fn put(arguments: &[Value]) -> Result<Value> {
    let key = arguments[0].as_str()?.to_string();
    let mut entries = arguments[2].as_map()?.clone();
    entries.insert(key, arguments[1].clone());
    Ok(Value::Map(Arc::new(entries)))
}
