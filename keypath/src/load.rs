//! Seeding mappings from YAML and JSON documents.
//!
//! Documents must have a mapping at their root. Nested mappings become
//! [`Node::Nested`](crate::Node::Nested) levels and every other value is kept
//! as a terminal. A mapping key the key type cannot hold (a float or null
//! key for [`Key`](crate::Key)) is an error wherever it appears. Only reading
//! is supported.

use std::fmt;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::mapping::PathMapping;

impl<K, V> PathMapping<K, V>
where
    K: DeserializeOwned + Hash + Eq,
    V: DeserializeOwned,
{
    /// Parses a YAML document into a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`](crate::Error::Yaml) if the text is not valid
    /// YAML or its root is not a mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::{KeyPath, PathMapping};
    ///
    /// let mapping: PathMapping = PathMapping::from_yaml_str("a:\n  b: 1\n").unwrap();
    /// assert!(mapping.contains_path(&KeyPath::from(["a", "b"])));
    /// ```
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Parses a JSON document into a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the text is not valid
    /// JSON or its root is not an object.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        debug!("loading YAML mapping from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("loading JSON mapping from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl<K, V> PathMapping<K, V>
where
    K: DeserializeOwned + Hash + Eq + Clone + fmt::Display,
    V: DeserializeOwned + Clone,
{
    /// Loads YAML files and merges them in order, later files taking
    /// precedence over earlier ones.
    ///
    /// `max_depth` is passed to every [`merge`](Self::merge).
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or parsed.
    pub fn from_yaml_layers<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        max_depth: Option<usize>,
    ) -> Result<Self> {
        let mut merged = Self::new();
        for path in paths {
            let layer = Self::from_yaml_file(path.as_ref())?;
            merged.merge(&layer, max_depth)?;
        }
        Ok(merged)
    }
}
