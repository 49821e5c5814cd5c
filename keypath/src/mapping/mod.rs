//! Nested mappings addressed by key paths.
//!
//! A [`PathMapping`] is an insertion-ordered mapping whose values are either
//! terminal values or further nested mappings ([`Node`]). Besides ordinary
//! single-key access it interprets a [`KeyPath`] as a walk through the nested
//! levels:
//!
//! - [`PathMapping::get`] fails on a missing segment or on an intermediate
//!   segment that holds a terminal value.
//! - [`PathMapping::set`] creates missing intermediate mappings (unless
//!   [`MappingOptions::recursive_create`] is off) and **replaces intermediate
//!   terminal values with empty mappings**.
//! - [`PathMapping::iter_paths`] flattens the tree into `(KeyPath, node)`
//!   pairs, optionally stopping at a depth.
//! - [`PathMapping::merge`] replays another mapping's flattened pairs on top
//!   of this one.
//!
//! # Examples
//!
//! ```
//! use keypath::{KeyPath, Node, PathMapping};
//!
//! let mut config: PathMapping = PathMapping::from_yaml_str(
//!     "server:\n  host: localhost\n  port: 8080\n",
//! )
//! .unwrap();
//!
//! let port = KeyPath::from(["server", "port"]);
//! assert_eq!(
//!     config.get(&port).unwrap(),
//!     &Node::Terminal(serde_yaml::Value::from(8080))
//! );
//!
//! config
//!     .set(&KeyPath::from(["server", "tls", "enabled"]), serde_yaml::Value::from(true))
//!     .unwrap();
//! assert!(config.get(&KeyPath::from(["server", "tls"])).unwrap().is_nested());
//! ```

mod iter;
mod merge;
mod node;
mod options;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::key::Key;
use crate::path::{render, KeyPath};

pub use iter::PathIter;
pub use node::{Node, Table};
pub use options::MappingOptions;

/// A nested mapping that accepts key paths for lookup and assignment.
///
/// Equality compares contents only; options are ignored, and as with any
/// hash map the order of entries does not matter.
///
/// Nested levels are owned outright by their parent, so a `PathMapping` is
/// a plain tree. Seeding from an existing map adopts it without copying.
#[derive(Debug, Clone)]
pub struct PathMapping<K = Key, V = serde_yaml::Value> {
    root: Table<K, V>,
    options: MappingOptions,
}

impl<K, V> PathMapping<K, V> {
    /// Creates an empty mapping with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MappingOptions::default())
    }

    /// Creates an empty mapping with the given options.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{MappingOptions, PathMapping};
    ///
    /// let mapping: PathMapping = PathMapping::with_options(MappingOptions::strict());
    /// assert!(!mapping.recursive_create());
    /// ```
    #[must_use]
    pub fn with_options(options: MappingOptions) -> Self {
        Self {
            root: IndexMap::new(),
            options,
        }
    }

    /// Adopts an existing top-level map with default options.
    #[must_use]
    pub fn from_map(root: Table<K, V>) -> Self {
        Self::from_map_with_options(root, MappingOptions::default())
    }

    /// Adopts an existing top-level map with the given options.
    #[must_use]
    pub fn from_map_with_options(root: Table<K, V>, options: MappingOptions) -> Self {
        Self { root, options }
    }

    /// Returns the options in effect.
    #[must_use]
    pub const fn options(&self) -> MappingOptions {
        self.options
    }

    /// Returns whether key-path writes create missing intermediate mappings.
    #[must_use]
    pub const fn recursive_create(&self) -> bool {
        self.options.recursive_create
    }

    /// Enables or disables creation of missing intermediate mappings.
    pub fn set_recursive_create(&mut self, recursive_create: bool) {
        self.options.recursive_create = recursive_create;
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns true if there are no top-level entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Iterates over top-level entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, Node<K, V>> {
        self.root.iter()
    }

    /// Iterates over top-level keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, Node<K, V>> {
        self.root.keys()
    }

    /// Returns the top-level map.
    #[must_use]
    pub const fn as_map(&self) -> &Table<K, V> {
        &self.root
    }

    /// Consumes the mapping, returning the top-level map.
    #[must_use]
    pub fn into_map(self) -> Table<K, V> {
        self.root
    }

    /// Consumes the mapping, returning it as a nested node.
    #[must_use]
    pub fn into_node(self) -> Node<K, V> {
        Node::Nested(self.root)
    }
}

impl<K, V> PathMapping<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    /// Looks up a single top-level key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get_key(&self, key: &K) -> Result<&Node<K, V>> {
        self.root.get(key).ok_or_else(|| Error::KeyNotFound {
            missing: key.to_string(),
            path: key.to_string(),
        })
    }

    /// Looks up a single top-level key, falling back to `default`.
    #[must_use]
    pub fn get_key_or<'a>(&'a self, key: &K, default: &'a Node<K, V>) -> &'a Node<K, V> {
        self.root.get(key).unwrap_or(default)
    }

    /// Returns true if the top-level key is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.root.contains_key(key)
    }

    /// Inserts or overwrites a single top-level entry, returning the previous
    /// value.
    pub fn insert(&mut self, key: K, value: impl Into<Node<K, V>>) -> Option<Node<K, V>> {
        self.root.insert(key, value.into())
    }

    /// Looks up the node a key path points at.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPath`] if `path` has no segments.
    /// - [`Error::KeyNotFound`] if any segment, including the last, is absent.
    /// - [`Error::NotAMapping`] if an intermediate segment holds a terminal
    ///   value.
    ///
    /// Both walk errors report the sub-path where the walk stopped and the
    /// full requested path.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Key, KeyPath, PathMapping};
    ///
    /// let mut mapping: PathMapping<Key, i64> = PathMapping::new();
    /// mapping.insert(Key::from("a"), 1_i64);
    ///
    /// let err = mapping.get(&KeyPath::from(["a", "b"])).unwrap_err();
    /// assert_eq!(err.to_string(), "entry a (from a.b) is not a mapping");
    ///
    /// let err = mapping.get(&KeyPath::from(["c"])).unwrap_err();
    /// assert!(err.is_key_not_found());
    /// ```
    pub fn get(&self, path: &KeyPath<K>) -> Result<&Node<K, V>> {
        let segments = path.segments();
        let (last, parents) = segments.split_last().ok_or(Error::EmptyPath)?;

        let mut table = &self.root;
        for (depth, segment) in parents.iter().enumerate() {
            table = match table.get(segment) {
                Some(Node::Nested(inner)) => inner,
                Some(Node::Terminal(_)) => {
                    return Err(not_a_mapping(&segments[..=depth], segments))
                }
                None => return Err(key_not_found(&segments[..=depth], segments)),
            };
        }

        table
            .get(last)
            .ok_or_else(|| key_not_found(segments, segments))
    }

    /// Looks up a key path, substituting `default` only when a key is missing.
    ///
    /// # Errors
    ///
    /// A [`Error::NotAMapping`] (or [`Error::EmptyPath`]) is never replaced
    /// by the default: descending through a terminal value is a type
    /// mismatch, not a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Key, KeyPath, Node, PathMapping};
    ///
    /// let mut mapping: PathMapping<Key, &str> = PathMapping::new();
    /// mapping.insert(Key::from("a"), "leaf");
    /// let fallback = Node::from("X");
    ///
    /// assert_eq!(mapping.get_or(&KeyPath::from(["missing"]), &fallback).unwrap(), &fallback);
    /// assert!(mapping.get_or(&KeyPath::from(["a", "b"]), &fallback).is_err());
    /// ```
    pub fn get_or<'a>(
        &'a self,
        path: &KeyPath<K>,
        default: &'a Node<K, V>,
    ) -> Result<&'a Node<K, V>> {
        Ok(self.find(path)?.unwrap_or(default))
    }

    /// Looks up a key path, mapping a missing key to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`get_or`](Self::get_or).
    pub fn find(&self, path: &KeyPath<K>) -> Result<Option<&Node<K, V>>> {
        match self.get(path) {
            Ok(node) => Ok(Some(node)),
            Err(err) if err.is_key_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Returns true if `path` resolves to a node.
    #[must_use]
    pub fn contains_path(&self, path: &KeyPath<K>) -> bool {
        self.get(path).is_ok()
    }

    /// Looks up the node a key path points at, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, path: &KeyPath<K>) -> Result<&mut Node<K, V>> {
        let segments = path.segments();
        let (last, parents) = segments.split_last().ok_or(Error::EmptyPath)?;

        let mut table = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            table = match table.get_mut(segment) {
                Some(Node::Nested(inner)) => inner,
                Some(Node::Terminal(_)) => {
                    return Err(not_a_mapping(&segments[..=depth], segments))
                }
                None => return Err(key_not_found(&segments[..=depth], segments)),
            };
        }

        table
            .get_mut(last)
            .ok_or_else(|| key_not_found(segments, segments))
    }

    /// Assigns `value` at the location a key path points at.
    ///
    /// Missing intermediate mappings are created when
    /// [`recursive_create`](Self::recursive_create) is on.
    ///
    /// **An intermediate segment that holds a terminal value is silently
    /// replaced by an empty mapping**, destroying the terminal. Writing
    /// `a.b.c` into `{a: {b: 1}}` yields `{a: {b: {c: ...}}}`. Check with
    /// [`get`](Self::get) first if that data matters.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPath`] if `path` has no segments.
    /// - [`Error::PathNotCreatable`] if an intermediate mapping is missing and
    ///   recursive creation is off. Nothing is modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{Key, KeyPath, MappingOptions, PathMapping};
    ///
    /// let path = KeyPath::from(["x", "y"]);
    ///
    /// let mut strict: PathMapping<Key, i64> = PathMapping::with_options(MappingOptions::strict());
    /// assert!(strict.set(&path, 1_i64).is_err());
    ///
    /// let mut relaxed: PathMapping<Key, i64> = PathMapping::new();
    /// relaxed.set(&path, 1_i64).unwrap();
    /// assert_eq!(relaxed.get(&path).unwrap().as_terminal(), Some(&1));
    /// ```
    pub fn set(&mut self, path: &KeyPath<K>, value: impl Into<Node<K, V>>) -> Result<()> {
        let recursive_create = self.options.recursive_create;
        self.write(path.segments(), value.into(), recursive_create)
    }

    fn write(
        &mut self,
        segments: &[K],
        node: Node<K, V>,
        recursive_create: bool,
    ) -> Result<()> {
        let (last, parents) = segments.split_last().ok_or(Error::EmptyPath)?;

        if !recursive_create {
            check_creatable(&self.root, parents, segments)?;
        }

        self.place(parents, last, node);
        Ok(())
    }

    /// Stores `node` under `parents` followed by `last`, creating or
    /// replacing every intermediate level as needed.
    pub(crate) fn place(&mut self, parents: &[K], last: &K, node: Node<K, V>) {
        let target = || format!("{}.{last}", render(parents));

        let mut table = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = match table.entry(segment.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    debug!(
                        "creating mapping at {} while writing {}",
                        render(&parents[..=depth]),
                        target()
                    );
                    entry.insert(Node::empty())
                }
            };
            if slot.is_terminal() {
                debug!(
                    "replacing terminal value at {} with a mapping while writing {}",
                    render(&parents[..=depth]),
                    target()
                );
            }
            table = slot.make_nested();
        }

        table.insert(last.clone(), node);
    }
}

/// Verifies that writing under `parents` needs no new intermediate mapping.
///
/// A terminal value in any but the last parent position would be replaced
/// by an empty mapping lacking the next segment, so it counts as missing.
fn check_creatable<K, V>(root: &Table<K, V>, parents: &[K], segments: &[K]) -> Result<()>
where
    K: Hash + Eq + fmt::Display,
{
    let mut table = root;
    for (depth, segment) in parents.iter().enumerate() {
        match table.get(segment) {
            Some(Node::Nested(inner)) => table = inner,
            Some(Node::Terminal(_)) if depth + 1 == parents.len() => return Ok(()),
            _ => {
                return Err(Error::PathNotCreatable {
                    path: render(segments),
                })
            }
        }
    }
    Ok(())
}

fn key_not_found<K: fmt::Display>(missing: &[K], full: &[K]) -> Error {
    Error::KeyNotFound {
        missing: render(missing),
        path: render(full),
    }
}

fn not_a_mapping<K: fmt::Display>(entry: &[K], full: &[K]) -> Error {
    Error::NotAMapping {
        entry: render(entry),
        path: render(full),
    }
}

impl<K, V> Default for PathMapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for PathMapping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<K: Hash + Eq, V: Eq> Eq for PathMapping<K, V> {}

impl<K: Hash + Eq, V: PartialEq> PartialEq<Table<K, V>> for PathMapping<K, V> {
    fn eq(&self, other: &Table<K, V>) -> bool {
        self.root == *other
    }
}

impl<K, V> From<Table<K, V>> for PathMapping<K, V> {
    fn from(root: Table<K, V>) -> Self {
        Self::from_map(root)
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, Node<K, V>)> for PathMapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, Node<K, V>)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<'a, K, V> IntoIterator for &'a PathMapping<K, V> {
    type Item = (&'a K, &'a Node<K, V>);
    type IntoIter = indexmap::map::Iter<'a, K, Node<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.iter()
    }
}

impl<K, V> Index<&KeyPath<K>> for PathMapping<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    type Output = Node<K, V>;

    /// # Panics
    ///
    /// Panics if [`get`](PathMapping::get) fails for `path`.
    fn index(&self, path: &KeyPath<K>) -> &Node<K, V> {
        match self.get(path) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'de, K, V> Deserialize<'de> for PathMapping<K, V>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IndexMap::<K, Node<K, V>>::deserialize(deserializer).map(Self::from_map)
    }
}
