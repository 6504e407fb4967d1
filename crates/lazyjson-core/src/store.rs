//! `ObjectStore` — the decoded key → value mapping and its typed accessors.
//!
//! # Lazy expansion
//!
//! Nested objects are kept as their raw `{...}` text. [`ObjectStore::get_object`]
//! scans that text again on every call and returns a new, independent store.
//! Unvisited branches are never decoded; the cost is that repeated access to
//! the same key repeats the scan.
//!
//! # Paths
//!
//! The `*_path` accessors and [`ObjectStore::object_at`] take dot-separated
//! key paths such as `"user.address.city"`. Every segment but the last must
//! name an object. Keys that themselves contain `.` are only reachable with
//! the single-key accessors.

use crate::error::{LazyJsonError, Result};
use crate::scanner::scan;
use crate::value::{ValueCell, ValueTag};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Decode a complete `{...}` text into an [`ObjectStore`].
///
/// Only the top level is decoded; nested objects and arrays are stored as
/// opaque text. On duplicate keys the last occurrence wins.
pub fn decode(text: &str) -> Result<ObjectStore> {
    ObjectStore::decode(text)
}

/// The top-level pairs of one decoded object. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObjectStore {
    entries: BTreeMap<String, ValueCell>,
}

impl ObjectStore {
    /// See [`decode`].
    pub fn decode(text: &str) -> Result<Self> {
        let entries: BTreeMap<String, ValueCell> = scan(text)?.into_iter().collect();
        debug!(keys = entries.len(), "decoded object");
        Ok(ObjectStore { entries })
    }

    /// Scalar text for `key`: the de-quoted payload of a string, the digits of
    /// an integer or the `true`/`false` token of a boolean.
    ///
    /// Objects and arrays are rejected with [`LazyJsonError::WrongAccessor`].
    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(cell) if cell.tag().is_scalar() => Ok(Some(cell.raw())),
            Some(cell) => Err(LazyJsonError::wrong_accessor(key, cell.tag())),
        }
    }

    /// Decode the nested object stored under `key`.
    ///
    /// Each call scans the stored text again and returns a fresh store.
    pub fn get_object(&self, key: &str) -> Result<Option<ObjectStore>> {
        let Some(cell) = self.entries.get(key) else {
            return Ok(None);
        };
        match cell.tag() {
            ValueTag::Object => {
                debug!(key, "expanding nested object");
                ObjectStore::decode(cell.raw()).map(Some)
            }
            ValueTag::Array => Err(LazyJsonError::wrong_accessor(key, ValueTag::Array)),
            tag => Err(LazyJsonError::format(
                0,
                format!("value of key '{key}' is {tag}, not an object"),
            )),
        }
    }

    /// The raw, bracketed text of the array stored under `key`. Elements are
    /// not decoded.
    pub fn get_array(&self, key: &str) -> Result<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(cell) if cell.tag() == ValueTag::Array => Ok(Some(cell.raw())),
            Some(cell) => Err(LazyJsonError::wrong_accessor(key, cell.tag())),
        }
    }

    /// Integer value of `key`. Fails with `WrongAccessor` for non-integer tags
    /// and with `Format` when the digits do not fit in an `i64`.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        let Some(cell) = self.typed_cell(key, ValueTag::Integer)? else {
            return Ok(None);
        };
        cell.raw().parse::<i64>().map(Some).map_err(|_| {
            LazyJsonError::format(0, format!("integer '{}' out of range for i64", cell.raw()))
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self
            .typed_cell(key, ValueTag::Boolean)?
            .map(|cell| cell.raw().eq_ignore_ascii_case("true")))
    }

    fn typed_cell(&self, key: &str, expected: ValueTag) -> Result<Option<&ValueCell>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(cell) if cell.tag() == expected => Ok(Some(cell)),
            Some(cell) => Err(LazyJsonError::wrong_accessor(key, cell.tag())),
        }
    }

    /// Walk a dotted path of nested objects. An empty path yields a copy of
    /// this store.
    pub fn object_at(&self, path: &str) -> Result<Option<ObjectStore>> {
        if path.is_empty() {
            return Ok(Some(self.clone()));
        }
        let mut current: Option<ObjectStore> = None;
        for segment in path.split('.') {
            let parent = current.as_ref().unwrap_or(self);
            match parent.get_object(segment)? {
                Some(store) => current = Some(store),
                None => return Ok(None),
            }
        }
        Ok(current)
    }

    /// [`get`](Self::get) on the last segment of a dotted path.
    pub fn get_path(&self, path: &str) -> Result<Option<String>> {
        self.with_parent(path, |store, key| {
            Ok(store.get(key)?.map(str::to_string))
        })
    }

    /// [`get_array`](Self::get_array) on the last segment of a dotted path.
    pub fn get_array_path(&self, path: &str) -> Result<Option<String>> {
        self.with_parent(path, |store, key| {
            Ok(store.get_array(key)?.map(str::to_string))
        })
    }

    fn with_parent<T>(
        &self,
        path: &str,
        read: impl FnOnce(&ObjectStore, &str) -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        match path.rsplit_once('.') {
            None => read(self, path),
            Some((parent, key)) => match self.object_at(parent)? {
                Some(store) => read(&store, key),
                None => Ok(None),
            },
        }
    }

    pub fn tag(&self, key: &str) -> Option<ValueTag> {
        self.entries.get(key).map(ValueCell::tag)
    }

    pub fn cell(&self, key: &str) -> Option<&ValueCell> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueCell)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Eagerly decode every nested object into a `serde_json::Value`.
    ///
    /// Integers become numbers (or strings if they overflow 64 bits), booleans
    /// become bools and strings keep their escape sequences verbatim. Arrays
    /// stay opaque and are emitted as their raw text.
    pub fn expand(&self) -> Result<Value> {
        let mut map = Map::new();
        for (key, cell) in &self.entries {
            let value = match cell.tag() {
                ValueTag::Object => ObjectStore::decode(cell.raw())?.expand()?,
                ValueTag::Integer => integer_value(cell.raw()),
                ValueTag::Boolean => Value::Bool(cell.raw().eq_ignore_ascii_case("true")),
                ValueTag::String | ValueTag::Array => Value::String(cell.raw().to_string()),
            };
            map.insert(key.clone(), value);
        }
        Ok(Value::Object(map))
    }
}

fn integer_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Value::Number(n.into());
    }
    Value::String(raw.to_string())
}

/// Debug rendering: `{key=tag(raw), ...}` in key order.
impl fmt::Display for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, cell)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={cell}")?;
        }
        f.write_str("}")
    }
}
