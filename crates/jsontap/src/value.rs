//! The immutable JSON value model.
//!
//! [`Value`] represents any JSON value as a tagged union. Trees are built by
//! the parser or by the [builders](crate::ObjectBuilder) and are never
//! mutated afterwards: every "modifying" operation in this crate (patch,
//! merge-patch) produces a new tree and leaves its input untouched.

use indexmap::IndexMap;

use crate::{generator::Generator, number::Number};

/// An ordered JSON object: keys keep their first-insertion order, and
/// equality ignores that order. Replacing an existing key keeps the key at
/// its original position.
pub type Map = IndexMap<String, Value>;

/// A JSON array.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Equality is deep structural equality: same variant, same contents, object
/// key order irrelevant, array order relevant, numbers compared by value
/// rather than by literal text.
///
/// # Examples
///
/// ```
/// use jsontap::{ObjectBuilder, Value};
///
/// let v = ObjectBuilder::new().add("key", "value").build();
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A number, with its literal text preserved.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// An ordered key/value mapping with unique keys.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean if the value is [`Bool`](Value::Bool).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if the value is [`Number`](Value::Number).
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the string slice if the value is [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if the value is [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map if the value is [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when the value is an object, `None` otherwise.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

macro_rules! impl_from_int_for_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Number(Number::from(v))
                }
            }
        )*
    };
}

impl_from_int_for_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl TryFrom<f64> for Value {
    type Error = crate::Error;

    /// Fails for NaN and the infinities, which have no JSON representation.
    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Number::from_f64(v)
            .map(Self::Number)
            .ok_or(crate::Error::InvalidState {
                detail: "non-finite f64 has no JSON representation",
            })
    }
}

impl core::fmt::Display for Value {
    /// Serializes through the [`Generator`], so `Display` and streaming
    /// generation share one code path.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut generator = Generator::new(f);
        generator.write_value(self).map_err(|_| core::fmt::Error)?;
        generator.close().map_err(|_| core::fmt::Error)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}
