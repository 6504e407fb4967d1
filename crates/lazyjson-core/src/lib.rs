//! # lazyjson-core
//!
//! Decoder for a restricted dialect of JSON: a single top-level object whose
//! nested objects and arrays are kept as raw text until asked for by key.
//!
//! A single left-to-right pass over the text splits it into top-level
//! key/value tokens, tags each value from its surface syntax and stores it in
//! an [`ObjectStore`]. Nested objects are decoded on demand by
//! [`ObjectStore::get_object`]; arrays are only ever returned as text.
//!
//! ## Quick start
//!
//! ```rust
//! use lazyjson_core::{decode, ValueTag};
//!
//! let store = decode(r#"{"name":"Alice","age":30,"address":{"city":"Oslo"}}"#).unwrap();
//! assert_eq!(store.get("name").unwrap(), Some("Alice"));
//! assert_eq!(store.tag("age"), Some(ValueTag::Integer));
//!
//! // Nested objects need the matching accessor.
//! assert!(store.get("address").is_err());
//! let address = store.get_object("address").unwrap().unwrap();
//! assert_eq!(address.get("city").unwrap(), Some("Oslo"));
//!
//! // Or walk a dotted path.
//! assert_eq!(store.get_path("address.city").unwrap().as_deref(), Some("Oslo"));
//! ```
//!
//! ## Supported values
//!
//! - quoted strings, escape sequences passed through verbatim
//! - bare integers (`-?[0-9]+`)
//! - bare `true` / `false`, case-insensitive
//! - `{...}` objects (decoded lazily) and `[...]` arrays (opaque text)
//!
//! Floats, `null` and other bare tokens are kept as strings.
//!
//! ## Modules
//!
//! - [`scanner`] — the single-pass key/value tokenizer
//! - [`store`] — `ObjectStore` and its typed accessors
//! - [`value`] — `ValueTag` classification and `ValueCell`
//! - [`error`] — error types for malformed input and mismatched accessors

pub mod error;
pub mod scanner;
pub mod store;
pub mod value;

pub use error::{LazyJsonError, Result};
pub use store::{decode, ObjectStore};
pub use value::{ValueCell, ValueTag};
