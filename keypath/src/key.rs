//! The default segment type for key paths.
//!
//! Nested documents are commonly keyed by strings, but integer, boolean and
//! composite keys show up too. [`Key`] covers all of them with a single
//! hashable, totally ordered type.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Unexpected, Visitor};

/// A single hashable key, usable as one segment of a [`KeyPath`](crate::KeyPath).
///
/// Deserializes from booleans, integers that fit in an `i64`, strings and
/// sequences of keys. Floating point and null keys are rejected.
///
/// # Examples
///
/// ```
/// use keypath::Key;
///
/// let name = Key::from("name");
/// let index = Key::from(3);
/// let pair = Key::from(vec![Key::from("b"), Key::from("c")]);
///
/// assert_eq!(name.to_string(), "name");
/// assert_eq!(index.to_string(), "3");
/// assert_eq!(pair.to_string(), "(b, c)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A boolean key.
    Bool(bool),
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
    /// An ordered composite key.
    Tuple(Vec<Key>),
    /// An unordered composite key. Never produced by deserialization.
    Set(BTreeSet<Key>),
}

impl Key {
    /// Returns the string slice if this is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    keys: impl IntoIterator<Item = &'a Key>,
) -> fmt::Result {
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}")?;
    }
    Ok(())
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                f.write_str(")")
            }
            Self::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, integer, string or sequence key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Key::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| {
                E::invalid_value(Unexpected::Unsigned(v), &"an integer key within i64 range")
            })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Key::Str(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Key::Tuple(items))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Key>> for Key {
    fn from(items: Vec<Key>) -> Self {
        Self::Tuple(items)
    }
}

impl From<BTreeSet<Key>> for Key {
    fn from(items: BTreeSet<Key>) -> Self {
        Self::Set(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Key::from("a 1 @").to_string(), "a 1 @");
        assert_eq!(Key::from(1).to_string(), "1");
        assert_eq!(Key::from(-7_i64).to_string(), "-7");
        assert_eq!(Key::from(true).to_string(), "true");
    }

    #[test]
    fn test_display_composites() {
        let tuple = Key::from(vec![Key::from("b"), Key::from("c")]);
        assert_eq!(tuple.to_string(), "(b, c)");

        let set: BTreeSet<Key> = [Key::from("e")].into_iter().collect();
        assert_eq!(Key::from(set).to_string(), "{e}");

        assert_eq!(Key::Tuple(Vec::new()).to_string(), "()");
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(Key::from("a"), Key::from(String::from("a")));
        assert_ne!(Key::from("1"), Key::from(1));
        assert_eq!(Key::from(5_u32), Key::from(5_i64));
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Key::from("x").as_str(), Some("x"));
        assert_eq!(Key::from(1).as_str(), None);
    }

    #[test]
    fn test_deserialize_yaml_keys() {
        let key: Key = serde_yaml::from_str("name").unwrap();
        assert_eq!(key, Key::from("name"));

        let key: Key = serde_yaml::from_str("42").unwrap();
        assert_eq!(key, Key::from(42));

        let key: Key = serde_yaml::from_str("true").unwrap();
        assert_eq!(key, Key::from(true));

        let key: Key = serde_yaml::from_str("[b, c]").unwrap();
        assert_eq!(key, Key::from(vec![Key::from("b"), Key::from("c")]));

        let key: Key = serde_json::from_str(r#""7""#).unwrap();
        assert_eq!(key, Key::from("7"));
    }

    #[test]
    fn test_deserialize_rejects_float_and_null_keys() {
        let err = serde_yaml::from_str::<Key>("1.5").unwrap_err();
        assert!(err
            .to_string()
            .contains("expected a boolean, integer, string or sequence key"));

        assert!(serde_yaml::from_str::<Key>("~").is_err());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_integer() {
        let err = serde_yaml::from_str::<Key>("9223372036854775808").unwrap_err();
        assert!(err.to_string().contains("within i64 range"));

        let key: Key = serde_yaml::from_str("9223372036854775807").unwrap();
        assert_eq!(key, Key::from(i64::MAX));
    }
}
