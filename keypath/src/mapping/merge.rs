//! Depth-bounded merging and structural copies.
//!
//! Both operations are built on the same replay: flatten a source mapping
//! with [`PathMapping::iter_paths`] and write every pair into a target with
//! [`PathMapping::set`].

use std::fmt;
use std::hash::Hash;

use log::{debug, trace};

use super::iter::PathIter;
use super::PathMapping;
use crate::error::Result;

impl<K, V> PathMapping<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
    V: Clone,
{
    /// Merges `other` into this mapping, with `other` taking precedence.
    ///
    /// Values at paths present in both are overwritten, paths only in
    /// `other` are created, and anything only in `self` is left alone.
    /// Beyond `max_depth` levels `other`'s sub-mappings are copied whole,
    /// replacing what was at that path. Writes follow this mapping's
    /// [`recursive_create`](Self::recursive_create) setting.
    ///
    /// Returns `self` for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotCreatable`](crate::Error::PathNotCreatable) if
    /// recursive creation is off and `other` introduces a path whose parent
    /// is missing here. Pairs applied before the failure stay applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Key, KeyPath, PathMapping};
    ///
    /// let mut base: PathMapping<Key, i64> = PathMapping::new();
    /// base.set(&KeyPath::from(["a"]), 0_i64).unwrap();
    /// base.set(&KeyPath::from(["b", "ba"]), 1_i64).unwrap();
    ///
    /// let mut overlay: PathMapping<Key, i64> = PathMapping::new();
    /// overlay.set(&KeyPath::from(["b", "bc"]), 2_i64).unwrap();
    ///
    /// let mut deep = base.clone();
    /// deep.merge(&overlay, None).unwrap();
    /// assert!(deep.contains_path(&KeyPath::from(["b", "ba"])));
    /// assert!(deep.contains_path(&KeyPath::from(["b", "bc"])));
    ///
    /// let mut shallow = base.clone();
    /// shallow.merge(&overlay, Some(0)).unwrap();
    /// assert!(!shallow.contains_path(&KeyPath::from(["b", "ba"])));
    /// assert!(shallow.contains_path(&KeyPath::from(["b", "bc"])));
    /// ```
    pub fn merge(&mut self, other: &Self, max_depth: Option<usize>) -> Result<&mut Self> {
        debug!(
            "merging {} top-level entries (max depth {max_depth:?})",
            other.len()
        );
        for (path, node) in other.iter_paths(max_depth) {
            trace!("merge {path}");
            self.set(&path, node.clone())?;
        }
        Ok(self)
    }

    /// Returns an independent copy with the same contents and options.
    ///
    /// The copy is rebuilt from scratch by replaying every flattened pair, so
    /// no mapping level is shared with `self`. Terminal values are cloned
    /// with their own `Clone`; a terminal holding a shared handle (an `Rc`,
    /// say) still shares what it points to. Empty nested mappings are kept.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        let mut copy = Self::with_options(self.options);
        for (path, node) in PathIter::new(&self.root, None, true) {
            // Flattened paths always have at least one segment.
            if let Some((last, parents)) = path.segments().split_last() {
                copy.place(parents, last, node.clone());
            }
        }
        copy
    }
}
