//! Single-pass object scanner.
//!
//! The scanner strips the outer `{` `}` pair and walks the remaining characters
//! once, left to right, splitting them into top-level key/value tokens. It keeps
//! three pieces of state:
//!
//! - `open`: the closers expected for every `{`/`[` seen outside strings. Its
//!   length is the nesting depth; a `}`/`]` must match the top entry. Only
//!   depth-0 `:` and `,` are structural.
//! - `in_string`: toggled on each unescaped `"`. A `\` always consumes the next
//!   character with it, so `\"` and `\\` never toggle the string state.
//! - `mode`: whether characters currently belong to the key or the value.
//!
//! Whitespace outside strings is dropped at depth 0 and copied verbatim inside
//! nested objects and arrays, so container tokens stay balanced and can be
//! scanned again by [`crate::ObjectStore::get_object`].
//!
//! Nothing is emitted until the whole text has scanned cleanly: an
//! unterminated string or unbalanced nesting at end of input fails the call.

use crate::error::{LazyJsonError, Result};
use crate::value::ValueCell;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Key,
    Value,
}

/// Scan one `{...}` text into its top-level `(key, value)` pairs, in source order.
///
/// Duplicate keys are all returned; the caller decides which occurrence wins.
///
/// Depth-0 whitespace is dropped even between the characters of a bare token,
/// so `{"a":1 2}` yields the integer token `12`.
pub fn scan(text: &str) -> Result<Vec<(String, ValueCell)>> {
    let (body, base) = strip_outer_braces(text)?;
    let mut scanner = Scanner::new(base);
    let mut chars = body.chars().enumerate();

    while let Some((i, c)) = chars.next() {
        let offset = base + i;

        if c == '\\' {
            let buf = scanner.buffer();
            buf.push(c);
            if let Some((_, escaped)) = chars.next() {
                buf.push(escaped);
            }
            continue;
        }

        if c == '"' {
            scanner.in_string = !scanner.in_string;
            scanner.buffer().push(c);
            continue;
        }

        if scanner.in_string {
            scanner.buffer().push(c);
            continue;
        }

        match c {
            '{' => {
                scanner.open.push('}');
                scanner.buffer().push(c);
            }
            '[' => {
                scanner.open.push(']');
                scanner.buffer().push(c);
            }
            '}' | ']' => {
                match scanner.open.pop() {
                    Some(expected) if expected == c => {}
                    Some(expected) => {
                        return Err(LazyJsonError::format(
                            offset,
                            format!("expected '{expected}' but found '{c}'"),
                        ));
                    }
                    None => {
                        return Err(LazyJsonError::format(
                            offset,
                            format!("unexpected '{c}' with no open object or array"),
                        ));
                    }
                }
                scanner.buffer().push(c);
            }
            ':' if scanner.open.is_empty() && scanner.mode == Mode::Key => {
                scanner.mode = Mode::Value;
            }
            ',' if scanner.open.is_empty() => match scanner.mode {
                Mode::Value => scanner.close_pair(offset)?,
                Mode::Key => {
                    return Err(LazyJsonError::format(offset, "key without value"));
                }
            },
            c if c.is_whitespace() => {
                if !scanner.open.is_empty() {
                    scanner.buffer().push(c);
                }
            }
            _ => scanner.buffer().push(c),
        }
    }

    let end = base + body.chars().count();
    if scanner.in_string {
        return Err(LazyJsonError::format(end, "unterminated string"));
    }
    if !scanner.open.is_empty() {
        return Err(LazyJsonError::format(
            end,
            format!(
                "unbalanced nesting, {} unclosed at end of input",
                scanner.open.len()
            ),
        ));
    }
    match scanner.mode {
        Mode::Value => scanner.close_pair(end)?,
        Mode::Key if !scanner.key.trim().is_empty() => {
            return Err(LazyJsonError::format(end, "key without value at end of input"));
        }
        Mode::Key => {}
    }

    Ok(scanner.pairs)
}

struct Scanner {
    open: Vec<char>,
    in_string: bool,
    mode: Mode,
    key: String,
    value: String,
    pairs: Vec<(String, ValueCell)>,
    base: usize,
}

impl Scanner {
    fn new(base: usize) -> Self {
        Scanner {
            open: Vec::new(),
            in_string: false,
            mode: Mode::Key,
            key: String::new(),
            value: String::new(),
            pairs: Vec::new(),
            base,
        }
    }

    /// The buffer the current character belongs to.
    fn buffer(&mut self) -> &mut String {
        match self.mode {
            Mode::Key => &mut self.key,
            Mode::Value => &mut self.value,
        }
    }

    fn close_pair(&mut self, offset: usize) -> Result<()> {
        let key = std::mem::take(&mut self.key);
        let value = std::mem::take(&mut self.value);
        let (key, value) = (key.trim(), value.trim());

        if key.is_empty() {
            return Err(LazyJsonError::format(offset, "missing key before ':'"));
        }
        let key = strip_key_quotes(key);
        if value.is_empty() {
            return Err(LazyJsonError::format(
                offset,
                format!("missing value for key '{key}'"),
            ));
        }

        let cell = ValueCell::new(value);
        trace!(key, tag = %cell.tag(), offset = offset - self.base, "closed pair");
        self.pairs.push((key.to_string(), cell));
        self.mode = Mode::Key;
        Ok(())
    }
}

/// Trim `text` and strip its outer brace pair. Returns the inner region and
/// the character offset of its first character within `text`.
fn strip_outer_braces(text: &str) -> Result<(&str, usize)> {
    let start_trimmed = text.trim_start();
    let leading = text[..text.len() - start_trimmed.len()].chars().count();
    let trimmed = start_trimmed.trim_end();

    if trimmed.len() < 2 || !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return Err(LazyJsonError::format(
            leading,
            "expected an object wrapped in '{' and '}'",
        ));
    }
    Ok((&trimmed[1..trimmed.len() - 1], leading + 1))
}

/// Strip one layer of matching `"` or `'` quotes from a key token.
fn strip_key_quotes(key: &str) -> &str {
    for quote in ['"', '\''] {
        if key.len() >= 2 && key.starts_with(quote) && key.ends_with(quote) {
            return &key[1..key.len() - 1];
        }
    }
    key
}
