//! Behaviour settings for a [`PathMapping`](crate::PathMapping).

use serde::{Deserialize, Serialize};

/// Options controlling how a mapping handles key-path writes.
///
/// Deserializable so applications can carry it in their own configuration
/// files; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use keypath::MappingOptions;
///
/// let options: MappingOptions = serde_yaml::from_str("recursive_create: false").unwrap();
/// assert!(!options.recursive_create);
///
/// let defaults: MappingOptions = serde_yaml::from_str("{}").unwrap();
/// assert_eq!(defaults, MappingOptions::default());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MappingOptions {
    /// Create missing intermediate mappings when writing through a key path.
    ///
    /// When false, writing to a path whose intermediate mapping is absent
    /// fails with [`Error::PathNotCreatable`](crate::Error::PathNotCreatable).
    pub recursive_create: bool,
}

impl MappingOptions {
    /// Options that refuse to create intermediate mappings.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            recursive_create: false,
        }
    }
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            recursive_create: true,
        }
    }
}
