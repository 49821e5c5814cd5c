//! Error types for the keypath library.
//!
//! Every failure raised while walking a nested mapping carries the rendered
//! sub-path where the walk stopped and the full path the caller asked for,
//! using `thiserror` for the `Display` and `source` plumbing.

use thiserror::Error;

/// Result type alias for operations that may fail with a keypath error.
///
/// # Examples
///
/// ```
/// use keypath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the keypath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A segment along the path (possibly the last one) is absent.
    #[error("key not found: {missing} (from {path})")]
    KeyNotFound {
        /// The path up to and including the missing segment.
        missing: String,
        /// The full path that was requested.
        path: String,
    },

    /// An intermediate segment holds a terminal value, so the walk cannot
    /// descend any further.
    #[error("entry {entry} (from {path}) is not a mapping")]
    NotAMapping {
        /// The path up to and including the offending segment.
        entry: String,
        /// The full path that was requested.
        path: String,
    },

    /// An intermediate mapping is missing and recursive creation is off.
    #[error("cannot create path {path}: intermediate mapping missing and recursive creation is disabled")]
    PathNotCreatable {
        /// The full path that was being written.
        path: String,
    },

    /// A lookup or assignment was attempted with a zero-length path.
    #[error("empty key path")]
    EmptyPath,

    /// A YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error indicates a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::Error;
    ///
    /// let err = Error::KeyNotFound { missing: "a".into(), path: "a.b".into() };
    /// assert!(err.is_key_not_found());
    /// ```
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Check if error indicates descent through a terminal value.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypath::Error;
    ///
    /// let err = Error::NotAMapping { entry: "a".into(), path: "a.b".into() };
    /// assert!(err.is_not_a_mapping());
    /// ```
    #[must_use]
    pub fn is_not_a_mapping(&self) -> bool {
        matches!(self, Self::NotAMapping { .. })
    }
}
