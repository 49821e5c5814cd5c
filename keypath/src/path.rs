//! Key paths: flattened addresses into nested mappings.
//!
//! A [`KeyPath`] is an immutable, ordered sequence of segments. Each segment
//! selects one level of nesting, so `a.b.c` addresses the value stored under
//! `c` inside the mapping stored under `b` inside the mapping stored under `a`.
//!
//! # Composition
//!
//! Paths compose by concatenation. Appending a path appends all of its
//! segments; appending a single segment is done with [`KeyPath::child`].
//!
//! ```
//! use keypath::KeyPath;
//!
//! let base: KeyPath = KeyPath::from(["b", "bb"]);
//! let tail: KeyPath = KeyPath::from(["bbb", "bbbb"]);
//!
//! let full = &base + &tail;
//! assert_eq!(full.len(), 4);
//! assert_eq!(full.child("bbbba").to_string(), "b.bb.bbb.bbbb.bbbba");
//! ```
//!
//! # Display
//!
//! The textual form joins segments with `.` and exists for diagnostics only.
//! No escaping is applied, so a segment whose text contains `.` cannot be
//! told apart from a separator. It is not a serialization format and there
//! is no parser for it.

use std::fmt;
use std::ops::Add;

use crate::error::{Error, Result};
use crate::key::Key;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// An immutable ordered sequence of key segments.
///
/// A zero-length path is valid and means "no further descent".
///
/// # Examples
///
/// ```
/// use keypath::{Key, KeyPath};
///
/// let path: KeyPath = KeyPath::from(["a", "b", "c"]);
/// assert_eq!(path.top().unwrap(), &Key::from("a"));
/// assert_eq!(path.descendants(), KeyPath::from(["b", "c"]));
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath<K = Key> {
    segments: Vec<K>,
}

impl<K> KeyPath<K> {
    /// Creates an empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns the first segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] if the path has no segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Error, Key, KeyPath};
    ///
    /// let path: KeyPath = KeyPath::from(["a", "b"]);
    /// assert_eq!(path.top().unwrap(), &Key::from("a"));
    ///
    /// let empty: KeyPath = KeyPath::new();
    /// assert!(matches!(empty.top(), Err(Error::EmptyPath)));
    /// ```
    pub fn top(&self) -> Result<&K> {
        self.segments.first().ok_or(Error::EmptyPath)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments as a slice.
    #[must_use]
    pub fn segments(&self) -> &[K] {
        &self.segments
    }

    /// Iterates over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.segments.iter()
    }
}

impl<K: Clone> KeyPath<K> {
    /// Returns a path of every segment after the first.
    ///
    /// A path of length 0 or 1 yields the empty path.
    #[must_use]
    pub fn descendants(&self) -> Self {
        Self {
            segments: self.segments.get(1..).unwrap_or_default().to_vec(),
        }
    }

    /// Returns a new path with all of `other`'s segments appended.
    ///
    /// Neither operand is modified.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = Vec::with_capacity(self.len() + other.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// Returns a new path with `segment` appended as a single segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::KeyPath;
    ///
    /// let parent: KeyPath = KeyPath::from(["server"]);
    /// let child = parent.child("port");
    /// assert_eq!(child.to_string(), "server.port");
    /// assert_eq!(parent.len(), 1);
    /// ```
    #[must_use]
    pub fn child(&self, segment: impl Into<K>) -> Self {
        let mut segments = Vec::with_capacity(self.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }
}

/// Renders segments joined with `.`.
pub(crate) fn render<K: fmt::Display>(segments: &[K]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

impl<K> Default for KeyPath<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Display> fmt::Display for KeyPath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments))
    }
}

impl<K, S: Into<K>> From<Vec<S>> for KeyPath<K> {
    fn from(segments: Vec<S>) -> Self {
        segments.into_iter().collect()
    }
}

impl<K, S: Into<K>, const N: usize> From<[S; N]> for KeyPath<K> {
    fn from(segments: [S; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl<K, S: Into<K>> FromIterator<S> for KeyPath<K> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a KeyPath<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl<K> Add for KeyPath<K> {
    type Output = KeyPath<K>;

    fn add(mut self, other: KeyPath<K>) -> KeyPath<K> {
        self.segments.extend(other.segments);
        self
    }
}

impl<K: Clone> Add for &KeyPath<K> {
    type Output = KeyPath<K>;

    fn add(self, other: &KeyPath<K>) -> KeyPath<K> {
        self.join(other)
    }
}
