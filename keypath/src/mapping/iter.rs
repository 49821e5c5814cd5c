//! Depth-bounded flattening of a nested mapping.

use std::hash::Hash;
use std::iter::FusedIterator;

use indexmap::map::Iter;

use super::node::{Node, Table};
use super::PathMapping;
use crate::path::KeyPath;

struct Frame<'a, K, V> {
    prefix: KeyPath<K>,
    entries: Iter<'a, K, Node<K, V>>,
    remaining: Option<usize>,
}

/// Iterator over `(KeyPath, &Node)` pairs produced by
/// [`PathMapping::iter_paths`].
///
/// Entries are visited depth-first in each level's insertion order. A
/// nested mapping is descended into unless the remaining depth has reached
/// zero, in which case it is yielded whole. Empty nested mappings contribute
/// no pairs.
pub struct PathIter<'a, K, V> {
    stack: Vec<Frame<'a, K, V>>,
    keep_empty: bool,
}

impl<'a, K, V> PathIter<'a, K, V> {
    pub(crate) fn new(root: &'a Table<K, V>, max_depth: Option<usize>, keep_empty: bool) -> Self {
        Self {
            stack: vec![Frame {
                prefix: KeyPath::new(),
                entries: root.iter(),
                remaining: max_depth,
            }],
            keep_empty,
        }
    }
}

impl<'a, K: Clone, V> Iterator for PathIter<'a, K, V> {
    type Item = (KeyPath<K>, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((key, node)) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };
            let path = frame.prefix.child(key.clone());

            match node {
                Node::Nested(table)
                    if frame.remaining != Some(0) && !(self.keep_empty && table.is_empty()) =>
                {
                    let remaining = frame.remaining.map(|depth| depth - 1);
                    self.stack.push(Frame {
                        prefix: path,
                        entries: table.iter(),
                        remaining,
                    });
                }
                _ => return Some((path, node)),
            }
        }
    }
}

impl<K: Clone, V> FusedIterator for PathIter<'_, K, V> {}

impl<K, V> PathMapping<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Flattens the mapping into `(KeyPath, &Node)` pairs.
    ///
    /// With `max_depth` of `None` every terminal value is yielded under its
    /// full path. With `Some(n)`, nested mappings found `n` levels below the
    /// top are yielded whole instead of being descended into; `Some(0)`
    /// yields exactly one pair per top-level key.
    ///
    /// Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Key, KeyPath, PathMapping};
    ///
    /// let mut mapping: PathMapping<Key, i64> = PathMapping::new();
    /// mapping.set(&KeyPath::from(["a"]), 0_i64).unwrap();
    /// mapping.set(&KeyPath::from(["b", "ba"]), 1_i64).unwrap();
    /// mapping.set(&KeyPath::from(["b", "bb", "bba"]), 2_i64).unwrap();
    ///
    /// let paths: Vec<String> = mapping
    ///     .iter_paths(None)
    ///     .map(|(path, _)| path.to_string())
    ///     .collect();
    /// assert_eq!(paths, ["a", "b.ba", "b.bb.bba"]);
    ///
    /// let shallow: Vec<String> = mapping
    ///     .iter_paths(Some(1))
    ///     .map(|(path, _)| path.to_string())
    ///     .collect();
    /// assert_eq!(shallow, ["a", "b.ba", "b.bb"]);
    /// ```
    pub fn iter_paths(&self, max_depth: Option<usize>) -> PathIter<'_, K, V> {
        PathIter::new(&self.root, max_depth, false)
    }
}
