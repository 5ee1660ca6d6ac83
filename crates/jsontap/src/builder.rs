//! Builders: mutable scratch state that terminally produces one [`Value`].
//!
//! A builder is consumed exactly once by [`build`](ObjectBuilder::build);
//! ownership makes reuse a compile error. Nesting works by passing a builder
//! where a value is expected — it is built at that point, so the caller never
//! holds a live nested builder past insertion.
//!
//! ```
//! use jsontap::{ArrayBuilder, ObjectBuilder};
//!
//! let person = ObjectBuilder::new()
//!     .add("name", "John")
//!     .add("age", 25)
//!     .add(
//!         "phones",
//!         ArrayBuilder::new().add("212 555-1234").add("646 555-4567"),
//!     )
//!     .build();
//! assert!(person.get("phones").is_some());
//! ```

use crate::value::{Array, Map, Value};

/// Accumulates key/value pairs for a JSON object.
///
/// Duplicate keys are last-write-wins; the replaced key keeps its original
/// insertion position.
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    map: Map,
}

impl ObjectBuilder {
    /// Creates an empty object builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one key/value pair.
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Consumes the builder, producing the finished object.
    #[must_use]
    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}

/// Accumulates elements for a JSON array.
#[derive(Debug, Default)]
pub struct ArrayBuilder {
    items: Array,
}

impl ArrayBuilder {
    /// Creates an empty array builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one element.
    #[must_use]
    pub fn add(mut self, value: impl Into<Value>) -> Self {
        self.items.push(value.into());
        self
    }

    /// Consumes the builder, producing the finished array.
    #[must_use]
    pub fn build(self) -> Value {
        Value::Array(self.items)
    }
}

impl From<ObjectBuilder> for Value {
    fn from(builder: ObjectBuilder) -> Self {
        builder.build()
    }
}

impl From<ArrayBuilder> for Value {
    fn from(builder: ArrayBuilder) -> Self {
        builder.build()
    }
}
