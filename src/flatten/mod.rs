//! Recursive flattening of nested sequences.
//!
//! A nested sequence is a `Vec<Nested<T>>`. Only [`Nested::List`] is
//! flattened; every [`Nested::Leaf`] payload is kept as is, so strings are
//! never split into characters.
//!
//! # Example
//!
//! ```
//! use linesweep::{flatten, nested};
//!
//! let flat = flatten(nested![1, [2, [3, [4]], 5]]).unwrap();
//! assert_eq!(flat, vec![1, 2, 3, 4, 5]);
//! ```

mod flattener;
mod json;
mod nested;

pub use flattener::{flatten, flatten_ref, Flattener, DEFAULT_MAX_DEPTH};
pub use json::flatten_json;
pub use nested::Nested;
