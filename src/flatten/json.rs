//! Flattening JSON documents.

use serde_json::Value;

use super::{Flattener, Nested};
use crate::Result;

/// Parse `text` as a JSON array and flatten it.
///
/// Arrays are flattened; objects, strings and scalars are leaves. A
/// top-level value that is not an array is rejected. serde_json refuses
/// documents nested more than 128 levels before the flattener sees them.
pub fn flatten_json(text: &str, flattener: &Flattener) -> Result<Vec<Value>> {
    let items: Vec<Nested<Value>> = serde_json::from_str(text)?;
    flattener.flatten(items)
}
