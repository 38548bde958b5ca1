//! The string-keyed state set with a canonical rendering.

use std::{collections::BTreeSet, fmt};

/// Delimiter placed between the items of [`StateSet::canonical`].
pub const CANONICAL_DELIMITER: &str = ",";

/// A set of state identifiers.
///
/// Items are kept sorted, so that iteration order and the canonical string
/// are deterministic functions of the contents.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    inner: BTreeSet<String>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(item: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(item);
        set
    }

    /// Insert an item, returning `true` if it was not present.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        self.inner.insert(item.into())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.inner.contains(item)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.iter().map(String::as_str)
    }

    pub fn union_with(&mut self, other: &Self) {
        self.inner.extend(other.inner.iter().cloned())
    }

    pub fn intersects(&self, other: &Self) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|item| large.contains(item))
    }

    /// The sorted items joined by [`CANONICAL_DELIMITER`].
    pub fn canonical(&self) -> String {
        let mut s = String::new();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                s.push_str(CANONICAL_DELIMITER);
            }
            s.push_str(item);
        }
        s
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.canonical())
    }
}

impl<S> FromIterator<S> for StateSet
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S> Extend<S> for StateSet
where
    S: Into<String>,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.inner.extend(iter.into_iter().map(Into::into))
    }
}
