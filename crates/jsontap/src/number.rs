//! Literal-preserving JSON numbers.
//!
//! [`Number`] keeps the exact text of the literal it was lexed or built from,
//! so round-tripping a document never loses precision. Equality and the
//! integral accessors work on the decoded numeric value: `100`, `1e2` and
//! `100.0` are all equal, and all of them are integral.

use crate::error::{Error, Position, SyntaxError};

/// A JSON number, stored as its exact literal text.
#[derive(Debug, Clone)]
pub struct Number {
    text: Box<str>,
}

impl Number {
    /// Wraps text the lexer has already validated against the number grammar.
    pub(crate) fn from_lexed(text: String) -> Self {
        Self {
            text: text.into_boxed_str(),
        }
    }

    /// Parses a number literal per the RFC 8259 grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if `text` is not exactly one valid JSON
    /// number literal.
    pub fn from_literal(text: &str) -> Result<Self, Error> {
        match validate_literal(text) {
            Ok(()) => Ok(Self::from_lexed(text.to_string())),
            Err(kind) => Err(Error::Malformed {
                kind,
                position: Position { line: 1, column: 1 },
            }),
        }
    }

    /// Converts a finite `f64`; `None` for NaN and the infinities, which have
    /// no JSON representation.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self::from_lexed(format!("{value}")))
    }

    /// The exact literal text, unchanged from the input.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.text
    }

    /// The numeric value as an `f64`, possibly losing precision.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.text.parse().unwrap_or(f64::NAN)
    }

    /// Whether the value is a mathematical integer (`100`, `1e2`, `25.0`).
    #[must_use]
    pub fn is_integral(&self) -> bool {
        let d = self.decompose();
        d.digits.is_empty() || d.exponent >= 0
    }

    /// The exact integer value, or `None` when the number is not integral or
    /// does not fit an `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        let d = self.decompose();
        if d.digits.is_empty() {
            return Some(0);
        }
        if d.exponent < 0 {
            return None;
        }
        // Accumulate negated so that i64::MIN survives.
        let mut n: i64 = 0;
        for &b in &d.digits {
            n = n.checked_mul(10)?.checked_sub(i64::from(b - b'0'))?;
        }
        for _ in 0..d.exponent {
            n = n.checked_mul(10)?;
        }
        if d.negative { Some(n) } else { n.checked_neg() }
    }

    fn decompose(&self) -> Decomposed {
        let bytes = self.text.as_bytes();
        let mut i = 0;
        let negative = bytes.first() == Some(&b'-');
        if negative {
            i += 1;
        }

        let mut digits: Vec<u8> = Vec::with_capacity(bytes.len());
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            digits.push(bytes[i]);
            i += 1;
        }

        let mut exponent: i64 = 0;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                digits.push(bytes[i]);
                exponent -= 1;
                i += 1;
            }
        }

        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            let exp_negative = match bytes.get(i) {
                Some(b'-') => {
                    i += 1;
                    true
                }
                Some(b'+') => {
                    i += 1;
                    false
                }
                _ => false,
            };
            let mut exp: i64 = 0;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                exp = exp
                    .saturating_mul(10)
                    .saturating_add(i64::from(bytes[i] - b'0'));
                i += 1;
            }
            if exp_negative {
                exponent = exponent.saturating_sub(exp);
            } else {
                exponent = exponent.saturating_add(exp);
            }
        }

        // Normalize: no leading zeros, no trailing zeros, zero is canonical.
        let leading = digits.iter().take_while(|&&b| b == b'0').count();
        digits.drain(..leading);
        while digits.last() == Some(&b'0') {
            digits.pop();
            exponent = exponent.saturating_add(1);
        }
        if digits.is_empty() {
            return Decomposed {
                negative: false,
                digits,
                exponent: 0,
            };
        }

        Decomposed {
            negative,
            digits,
            exponent,
        }
    }
}

/// Normalized form: value = (-1)^negative × digits × 10^exponent, with
/// `digits` free of leading and trailing zeros. Zero is the empty digit
/// string.
#[derive(Debug, PartialEq, Eq)]
struct Decomposed {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

fn validate_literal(text: &str) -> Result<(), SyntaxError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => {
            i += 1;
            if bytes.get(i).is_some_and(u8::is_ascii_digit) {
                return Err(SyntaxError::LeadingZero);
            }
        }
        Some(b) if b.is_ascii_digit() => {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        }
        Some(&b) => return Err(SyntaxError::InvalidCharacter(char::from(b))),
        None => return Err(SyntaxError::ExpectedDigit),
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !bytes.get(i).is_some_and(u8::is_ascii_digit) {
            return Err(SyntaxError::ExpectedDigit);
        }
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !bytes.get(i).is_some_and(u8::is_ascii_digit) {
            return Err(SyntaxError::ExpectedDigit);
        }
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    match bytes.get(i) {
        None => Ok(()),
        Some(&b) => Err(SyntaxError::InvalidCharacter(char::from(b))),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text || self.decompose() == other.decompose()
    }
}

impl Eq for Number {}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

macro_rules! impl_from_int_for_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::from_lexed(v.to_string())
                }
            }
        )*
    };
}

impl_from_int_for_number!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(feature = "serde")]
impl serde::Serialize for Number {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_f64(self.as_f64()),
        }
    }
}
