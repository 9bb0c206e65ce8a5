//! Depth-limited recursive flattening.

use tracing::trace;

use super::Nested;
use crate::error::LinesweepError;
use crate::Result;

/// Default number of nested `List` levels accepted below the top-level sequence.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Flattens nested sequences with a configurable depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flattener {
    max_depth: usize,
}

impl Flattener {
    /// Create a flattener with [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth. `0` only accepts already flat input.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Flatten `items`, moving leaves into the output in depth-first,
    /// left-to-right order.
    pub fn flatten<T>(&self, items: Vec<Nested<T>>) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            self.collect_owned(item, 0, &mut out)?;
        }
        trace!(leaves = out.len(), "flattened owned sequence");
        Ok(out)
    }

    /// Flatten `items` without consuming them.
    pub fn flatten_ref<'a, T>(&self, items: &'a [Nested<T>]) -> Result<Vec<&'a T>> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            self.collect_ref(item, 0, &mut out)?;
        }
        trace!(leaves = out.len(), "flattened borrowed sequence");
        Ok(out)
    }

    fn enter(&self, level: usize) -> Result<usize> {
        let level = level + 1;
        if level > self.max_depth {
            return Err(LinesweepError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(level)
    }

    fn collect_owned<T>(&self, item: Nested<T>, level: usize, out: &mut Vec<T>) -> Result<()> {
        match item {
            Nested::Leaf(value) => out.push(value),
            Nested::List(children) => {
                let level = self.enter(level)?;
                for child in children {
                    self.collect_owned(child, level, out)?;
                }
            }
        }
        Ok(())
    }

    fn collect_ref<'a, T>(
        &self,
        item: &'a Nested<T>,
        level: usize,
        out: &mut Vec<&'a T>,
    ) -> Result<()> {
        match item {
            Nested::Leaf(value) => out.push(value),
            Nested::List(children) => {
                let level = self.enter(level)?;
                for child in children {
                    self.collect_ref(child, level, out)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten nested lists into a single list using the default depth limit.
pub fn flatten<T>(items: Vec<Nested<T>>) -> Result<Vec<T>> {
    Flattener::new().flatten(items)
}

/// Borrowing variant of [`flatten`].
pub fn flatten_ref<T>(items: &[Nested<T>]) -> Result<Vec<&T>> {
    Flattener::new().flatten_ref(items)
}
