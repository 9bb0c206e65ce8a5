//! Junk character removal and line cleanup.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// A set of characters removed from every raw line before trimming.
///
/// Removal is a per-character membership filter, never a substring match,
/// so the order in which the set was built does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunkSet {
    chars: BTreeSet<char>,
}

impl JunkSet {
    /// Build a set from every character of `chars`.
    pub fn new(chars: &str) -> Self {
        chars.chars().collect()
    }

    /// An empty set; lines are only trimmed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Remove every junk character from `line`.
    ///
    /// Borrows `line` unchanged when it holds no junk.
    pub fn remove_from<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.is_empty() || !line.chars().any(|c| self.contains(c)) {
            return Cow::Borrowed(line);
        }
        Cow::Owned(line.chars().filter(|c| !self.contains(*c)).collect())
    }

    /// Remove junk, then trim surrounding whitespace.
    ///
    /// Returns `None` when nothing is left, so blank and junk-only lines can
    /// be skipped.
    pub fn clean(&self, line: &str) -> Option<String> {
        let stripped = self.remove_from(line);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl FromIterator<char> for JunkSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl From<&str> for JunkSet {
    fn from(chars: &str) -> Self {
        Self::new(chars)
    }
}

impl fmt::Display for JunkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
