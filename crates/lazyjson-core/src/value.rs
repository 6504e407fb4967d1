//! Value tags and the immutable cell that stores one decoded value token.
//!
//! Tags are inferred from surface syntax only: a quoted `"123"` is a
//! [`ValueTag::String`] while a bare `123` is a [`ValueTag::Integer`]. There is
//! no float or null tag; `3.14` and `null` are kept as strings.

use serde::Serialize;
use std::fmt;

/// The inferred category of a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTag {
    String,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ValueTag {
    /// Classify a trimmed value token.
    ///
    /// Order: `{..}` object, `[..]` array, quoted string, `-?[0-9]+` integer,
    /// case-insensitive `true`/`false` boolean, anything else string.
    pub fn classify(token: &str) -> ValueTag {
        if is_wrapped(token, '{', '}') {
            ValueTag::Object
        } else if is_wrapped(token, '[', ']') {
            ValueTag::Array
        } else if is_wrapped(token, '"', '"') {
            ValueTag::String
        } else if is_integer(token) {
            ValueTag::Integer
        } else if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false") {
            ValueTag::Boolean
        } else {
            ValueTag::String
        }
    }

    /// Name of the `ObjectStore` accessor that reads values with this tag.
    pub fn accessor(self) -> &'static str {
        match self {
            ValueTag::Object => "get_object",
            ValueTag::Array => "get_array",
            ValueTag::String | ValueTag::Integer | ValueTag::Boolean => "get",
        }
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueTag::Object | ValueTag::Array)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueTag::String => "string",
            ValueTag::Integer => "integer",
            ValueTag::Boolean => "boolean",
            ValueTag::Object => "object",
            ValueTag::Array => "array",
        };
        f.write_str(name)
    }
}

/// One decoded value: its text and the tag inferred from it.
///
/// Quoted strings are stored without their surrounding quotes; escape
/// sequences inside are kept verbatim. Objects and arrays keep their
/// delimiters so the text can be scanned again later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCell {
    tag: ValueTag,
    raw: String,
}

impl ValueCell {
    /// Build a cell from a trimmed value token.
    pub fn new(token: &str) -> Self {
        let tag = ValueTag::classify(token);
        let raw = if tag == ValueTag::String && is_wrapped(token, '"', '"') {
            token[1..token.len() - 1].to_string()
        } else {
            token.to_string()
        };
        ValueCell { tag, raw }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tag(&self) -> ValueTag {
        self.tag
    }
}

impl fmt::Display for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tag, self.raw)
    }
}

fn is_wrapped(token: &str, open: char, close: char) -> bool {
    token.len() >= 2 && token.starts_with(open) && token.ends_with(close)
}

fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_surface_syntax() {
        assert_eq!(ValueTag::classify(r#""123""#), ValueTag::String);
        assert_eq!(ValueTag::classify("123"), ValueTag::Integer);
        assert_eq!(ValueTag::classify("-7"), ValueTag::Integer);
        assert_eq!(ValueTag::classify("TRUE"), ValueTag::Boolean);
        assert_eq!(ValueTag::classify("False"), ValueTag::Boolean);
        assert_eq!(ValueTag::classify(r#"{"a":1}"#), ValueTag::Object);
        assert_eq!(ValueTag::classify("[1,2]"), ValueTag::Array);
    }

    #[test]
    fn unsupported_shapes_fall_back_to_string() {
        assert_eq!(ValueTag::classify("3.14"), ValueTag::String);
        assert_eq!(ValueTag::classify("null"), ValueTag::String);
        assert_eq!(ValueTag::classify("-"), ValueTag::String);
        assert_eq!(ValueTag::classify("+5"), ValueTag::String);
        assert_eq!(ValueTag::classify("\""), ValueTag::String);
    }

    #[test]
    fn cell_strips_one_quote_layer() {
        let cell = ValueCell::new(r#""say \"hi\"""#);
        assert_eq!(cell.tag(), ValueTag::String);
        assert_eq!(cell.raw(), r#"say \"hi\""#);
    }

    #[test]
    fn cell_keeps_delimiters_for_containers() {
        let cell = ValueCell::new(r#"{"x":"1"}"#);
        assert_eq!(cell.tag(), ValueTag::Object);
        assert_eq!(cell.raw(), r#"{"x":"1"}"#);
        assert_eq!(cell.to_string(), r#"object({"x":"1"})"#);
    }
}
