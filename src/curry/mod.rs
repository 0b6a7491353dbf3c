//! Placeholder-aware currying over dynamically typed functions.
//!
//! This module provides the building blocks every registered function is
//! made of:
//!
//! - [`Value`]: the dynamically typed argument and result type
//! - [`Function`] and [`Arity`]: shareable callables
//! - [`curry`]: turns a function into one that accepts its arguments
//!   positionally, partially, or out of order
//! - [`__`]: the placeholder marking an argument to be supplied later
//! - [`args!`](crate::args) and [`call!`](crate::call): argument helpers
//!
//! # Examples
//!
//! ```rust
//! use funbox::{Function, Value, call, __};
//!
//! let volume = Function::from_fn3("volume", |width, height, depth| {
//!     Ok(Value::Int(width.as_int()? * height.as_int()? * depth.as_int()?))
//! })
//! .curried();
//!
//! assert_eq!(call!(volume, 2, 3, 4).unwrap(), Value::Int(24));
//!
//! let with_width = call!(volume, 2).unwrap();
//! let with_depth = call!(with_width, __, 4).unwrap();
//! assert_eq!(call!(with_depth, 3).unwrap(), Value::Int(24));
//! ```
//!
//! # Laws
//!
//! For any three-argument function `g`:
//!
//! ```text
//! curry(g)(__, b)(a, c) == curry(g)(a)(__, c)(b) == curry(g)(a, b, c) == g(a, b, c)
//! ```

mod engine;
mod function;
mod placeholder;
mod value;

pub use engine::curry;
pub use function::{Arity, Function, NativeBody};
pub use placeholder::__;
pub use value::Value;
