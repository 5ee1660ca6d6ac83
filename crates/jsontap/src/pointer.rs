//! RFC 6901 JSON Pointers.
//!
//! A pointer is a `/`-separated sequence of reference tokens with `~1`
//! decoding to `/` and `~0` to `~`, in that order. The empty string addresses
//! the whole document.
//!
//! # Examples
//!
//! ```
//! use jsontap::{Pointer, parse};
//!
//! let doc = parse(r#"{"a b": {"c/d": [10, 20]}}"#).unwrap();
//! let pointer = Pointer::parse("/a b/c~1d/1").unwrap();
//! assert_eq!(pointer.evaluate(&doc).unwrap(), &parse("20").unwrap());
//! assert!(!Pointer::parse("/a b/missing").unwrap().contains(&doc));
//! ```

use crate::{error::Error, value::Value};

/// A parsed JSON Pointer: the original string plus its decoded tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    text: String,
    tokens: Vec<String>,
}

impl Pointer {
    /// Parses an RFC 6901 pointer string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPointer`] unless the string is empty or starts with
    /// `/`, or when a `~` escape is not `~0` or `~1`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        if text.is_empty() {
            return Ok(Self {
                text: String::new(),
                tokens: Vec::new(),
            });
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(Error::InvalidPointer {
                pointer: text.to_string(),
                detail: "a non-empty pointer must start with '/'",
            });
        };
        let tokens = rest
            .split('/')
            .map(|raw| decode_token(raw, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: text.to_string(),
            tokens,
        })
    }

    /// The original pointer string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The decoded reference tokens, in order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether this pointer addresses the whole document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Walks the pointer through `target` and returns the addressed value.
    ///
    /// Array tokens must be in-range indices; the `-` append marker is never
    /// valid for reading.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] when any token fails to resolve.
    pub fn evaluate<'v>(&self, target: &'v Value) -> Result<&'v Value, Error> {
        let mut current = target;
        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get(token).ok_or_else(|| self.not_found())?,
                Value::Array(items) => array_index(token)
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| self.not_found())?,
                _ => return Err(self.not_found()),
            };
        }
        Ok(current)
    }

    /// Whether [`evaluate`](Self::evaluate) would succeed on `target`.
    #[must_use]
    pub fn contains(&self, target: &Value) -> bool {
        self.evaluate(target).is_ok()
    }

    pub(crate) fn not_found(&self) -> Error {
        Error::PathNotFound {
            pointer: self.text.clone(),
        }
    }
}

impl core::str::FromStr for Pointer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for Pointer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

fn decode_token(raw: &str, pointer: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => {
                return Err(Error::InvalidPointer {
                    pointer: pointer.to_string(),
                    detail: "'~' must be followed by '0' or '1'",
                });
            }
        }
    }
    Ok(out)
}

/// Interprets a reference token as an array index: a non-negative integer
/// with no leading zero (`"0"` itself excepted). The `-` marker is not an
/// index.
pub(crate) fn array_index(token: &str) -> Option<usize> {
    if token == "0" {
        return Some(0);
    }
    if token.is_empty() || token.starts_with('0') || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
