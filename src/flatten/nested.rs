//! The nested sequence type.

use serde::{Deserialize, Serialize};

/// An element of a nested sequence.
///
/// `List` is the only flattenable kind. Everything stored in a `Leaf`,
/// including strings, maps and even `Vec`s, is treated as an opaque value.
///
/// Deserialization is untagged: a JSON array becomes a `List`, any other
/// JSON value becomes a `Leaf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    /// A nested sequence, flattened recursively.
    List(Vec<Nested<T>>),
    /// A single leaf value.
    Leaf(T),
}

impl<T> Nested<T> {
    /// Wrap a value as a leaf.
    pub fn leaf(value: T) -> Self {
        Nested::Leaf(value)
    }

    /// Build a nested list from anything convertible into elements.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Nested<T>>,
    {
        Nested::List(items.into_iter().map(Into::into).collect())
    }

    /// Check if this element is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Nested::Leaf(_))
    }

    /// Number of `List` levels at or below this element.
    ///
    /// A leaf has depth 0, `[]` and `[x]` have depth 1. Walks with an
    /// explicit stack, so arbitrarily deep values are fine.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((item, level)) = stack.pop() {
            if let Nested::List(items) = item {
                let level = level + 1;
                deepest = deepest.max(level);
                stack.extend(items.iter().map(|child| (child, level)));
            }
        }
        deepest
    }

    /// Number of leaves reachable from this element.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(item) = stack.pop() {
            match item {
                Nested::Leaf(_) => count += 1,
                Nested::List(items) => stack.extend(items),
            }
        }
        count
    }
}

impl<T> From<Vec<Nested<T>>> for Nested<T> {
    fn from(items: Vec<Nested<T>>) -> Self {
        Nested::List(items)
    }
}

/// Build a `Vec<Nested<T>>` from a bracketed literal.
///
/// Bracketed groups become `Nested::List`, anything else a `Nested::Leaf`.
/// Leaves must be single token trees: literals, identifiers, or
/// parenthesized expressions.
///
/// ```
/// use linesweep::{flatten, nested};
///
/// let items = nested![1, [2, [3, [4]], 5]];
/// assert_eq!(flatten(items).unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
#[macro_export]
macro_rules! nested {
    (@item [$($inner:tt)*]) => {
        $crate::Nested::List($crate::nested![$($inner)*])
    };
    (@item $leaf:tt) => {
        $crate::Nested::Leaf($leaf)
    };
    ($($item:tt),* $(,)?) => {
        vec![$($crate::nested!(@item $item)),*]
    };
}
