//! Stored values: terminals and nested mappings.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::value::{EnumAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserialize, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Visitor};

use crate::key::Key;

/// An insertion-ordered mapping level.
pub type Table<K = Key, V = serde_yaml::Value> = IndexMap<K, Node<K, V>>;

/// A value stored in a [`PathMapping`](crate::PathMapping).
///
/// Either a terminal value (a leaf of the tree) or a further nested mapping.
/// Path walks match on this tag to decide whether they may descend.
///
/// When deserialized, mappings always become [`Node::Nested`] and anything
/// else becomes [`Node::Terminal`]. A mapping key that `K` cannot represent
/// fails the whole deserialization, at any nesting level.
///
/// # Examples
///
/// ```
/// use keypath::{Key, Node};
///
/// let leaf: Node<Key, i64> = Node::from(3_i64);
/// assert_eq!(leaf.as_terminal(), Some(&3));
///
/// let empty: Node<Key, i64> = Node::empty();
/// assert!(empty.is_nested());
/// ```
#[derive(Debug, Clone)]
pub enum Node<K = Key, V = serde_yaml::Value> {
    /// A nested mapping level.
    Nested(Table<K, V>),
    /// A non-mapping value.
    Terminal(V),
}

impl<K, V> Node<K, V> {
    /// Creates an empty nested mapping.
    #[must_use]
    pub fn empty() -> Self {
        Self::Nested(IndexMap::new())
    }

    /// Returns true if this node is a nested mapping.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Returns true if this node is a terminal value.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// Returns the terminal value, if any.
    #[must_use]
    pub const fn as_terminal(&self) -> Option<&V> {
        match self {
            Self::Terminal(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    /// Returns the nested mapping, if any.
    #[must_use]
    pub const fn as_nested(&self) -> Option<&Table<K, V>> {
        match self {
            Self::Nested(table) => Some(table),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the nested mapping mutably, if any.
    pub fn as_nested_mut(&mut self) -> Option<&mut Table<K, V>> {
        match self {
            Self::Nested(table) => Some(table),
            Self::Terminal(_) => None,
        }
    }

    /// Consumes the node, returning the terminal value if any.
    #[must_use]
    pub fn into_terminal(self) -> Option<V> {
        match self {
            Self::Terminal(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    /// Returns the nested mapping, first replacing a terminal value with an
    /// empty mapping.
    pub(crate) fn make_nested(&mut self) -> &mut Table<K, V> {
        if self.is_terminal() {
            *self = Self::empty();
        }
        match self {
            Self::Nested(table) => table,
            Self::Terminal(_) => unreachable!(),
        }
    }
}

impl<K, V> From<V> for Node<K, V> {
    fn from(value: V) -> Self {
        Self::Terminal(value)
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for Node<K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nested(a), Self::Nested(b)) => a == b,
            (Self::Terminal(a), Self::Terminal(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Node<K, V> {}

impl<'de, K, V> Deserialize<'de> for Node<K, V>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor {
            marker: PhantomData,
        })
    }
}

struct NodeVisitor<K, V> {
    marker: PhantomData<fn() -> Node<K, V>>,
}

// Hands a scalar the visitor already consumed back to `V`.
fn terminal<'de, K, V, T, E>(value: T) -> Result<Node<K, V>, E>
where
    V: Deserialize<'de>,
    T: IntoDeserializer<'de, E>,
    E: de::Error,
{
    V::deserialize(value.into_deserializer()).map(Node::Terminal)
}

impl<'de, K, V> Visitor<'de> for NodeVisitor<K, V>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
{
    type Value = Node<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping or a terminal value")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<K>()? {
            let value = map.next_value::<Node<K, V>>()?;
            table.insert(key, value);
        }
        Ok(Node::Nested(table))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        terminal(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        terminal(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        terminal(())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        terminal(())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        V::deserialize(deserializer).map(Node::Terminal)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        V::deserialize(deserializer).map(Node::Terminal)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        V::deserialize(SeqAccessDeserializer::new(seq)).map(Node::Terminal)
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        V::deserialize(EnumAccessDeserializer::new(data)).map(Node::Terminal)
    }
}
