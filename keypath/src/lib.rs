#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # keypath
//!
//! Structured addressing into nested mappings using flattened key paths.
//!
//! Instead of chaining single-key lookups with an existence check at every
//! level, callers build a [`KeyPath`] and hand it to a [`PathMapping`], which
//! walks the nested levels for them.
//!
//! ## Core Types
//!
//! - [`KeyPath`]: Immutable sequence of key segments with concatenation
//! - [`Key`]: Default hashable segment type
//! - [`PathMapping`] and [`Node`]: Nested mapping container and its values
//! - [`MappingOptions`]: Write behaviour for missing intermediate mappings
//! - [`Error`] and [`Result`]: Error handling types
//!
//! ## Examples
//!
//! ```
//! use keypath::{Key, KeyPath, PathMapping};
//!
//! let mut mapping: PathMapping<Key, i64> = PathMapping::new();
//! mapping.set(&KeyPath::from(["a"]), 0_i64).unwrap();
//! mapping.set(&KeyPath::from(["b", "ba"]), 1_i64).unwrap();
//!
//! let mut overlay: PathMapping<Key, i64> = PathMapping::new();
//! overlay.set(&KeyPath::from(["b", "bc"]), 2_i64).unwrap();
//! mapping.merge(&overlay, None).unwrap();
//!
//! let flattened: Vec<String> = mapping
//!     .iter_paths(None)
//!     .map(|(path, _)| path.to_string())
//!     .collect();
//! assert_eq!(flattened, ["a", "b.ba", "b.bc"]);
//! ```
//!
//! ## Thread safety
//!
//! Mappings are plain owned trees with no internal synchronization. Share
//! one across threads behind a lock such as `std::sync::Mutex`.

pub mod error;
pub mod key;
pub mod load;
pub mod mapping;
pub mod path;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use key::Key;
pub use mapping::{MappingOptions, Node, PathIter, PathMapping, Table};
pub use path::KeyPath;
