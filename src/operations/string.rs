//! Operations on strings.

use crate::curry::Value;
use crate::error::Result;

/// `strip(string)`: removes leading and trailing whitespace.
pub(super) fn strip(arguments: &[Value]) -> Result<Value> {
    Ok(Value::from(arguments[0].as_str()?.trim()))
}

/// `size(string)`: length in characters.
pub(super) fn size(arguments: &[Value]) -> Result<Value> {
    Ok(Value::from(arguments[0].as_str()?.chars().count()))
}

/// `capitalize(string)`: first character upper case, the rest lower case.
pub(super) fn capitalize(arguments: &[Value]) -> Result<Value> {
    let mut characters = arguments[0].as_str()?.chars();
    let capitalized: String = match characters.next() {
        Some(first) => first
            .to_uppercase()
            .chain(characters.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    Ok(Value::from(capitalized))
}
