//! RFC 6902 JSON Patch.
//!
//! A patch is an ordered list of operations applied sequentially. Application
//! works on a private copy of the target, so a failure anywhere in the list
//! leaves the caller's tree exactly as it was: the new tree is only handed
//! out on full success.
//!
//! # Examples
//!
//! ```
//! use jsontap::{PatchBuilder, Pointer, parse};
//!
//! let doc = parse(r#"{"a": {"b": 1}}"#).unwrap();
//! let patch = PatchBuilder::new()
//!     .add("/a/c", 2)
//!     .remove("/a/b")
//!     .build()
//!     .unwrap();
//! let out = patch.apply(&doc).unwrap();
//! assert_eq!(out, parse(r#"{"a": {"c": 2}}"#).unwrap());
//! // The original is untouched.
//! assert!(Pointer::parse("/a/b").unwrap().contains(&doc));
//! ```

use crate::{
    builder::{ArrayBuilder, ObjectBuilder},
    error::Error,
    pointer::{Pointer, array_index},
    value::Value,
};

/// One patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Inserts or replaces the value at `path`; in arrays, inserts before the
    /// index (or appends for the `-` token).
    Add {
        /// Target location.
        path: Pointer,
        /// Value to insert.
        value: Value,
    },
    /// Deletes the value at `path`; array elements after it shift left.
    Remove {
        /// Target location; must exist.
        path: Pointer,
    },
    /// Replaces the existing value at `path`.
    Replace {
        /// Target location; must exist.
        path: Pointer,
        /// Replacement value.
        value: Value,
    },
    /// Removes the value at `from` and adds it at `path`.
    Move {
        /// Source location; must exist.
        from: Pointer,
        /// Destination; must not be a proper descendant of `from`.
        path: Pointer,
    },
    /// Adds a copy of the value at `from` to `path`.
    Copy {
        /// Source location; must exist.
        from: Pointer,
        /// Destination.
        path: Pointer,
    },
    /// Asserts that the value at `path` deep-equals `value`.
    Test {
        /// Location to compare.
        path: Pointer,
        /// Expected value.
        value: Value,
    },
}

/// An ordered list of [`PatchOp`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    /// Creates a patch from already-built operations.
    #[must_use]
    pub fn new(ops: Vec<PatchOp>) -> Self {
        Self { ops }
    }

    /// The operations, in application order.
    #[must_use]
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    /// Parses a patch document: an array of operation objects
    /// `{"op": .., "path": .., ["from": ..], ["value": ..]}`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPatch`] for a non-array document, an unknown op name
    /// or a missing field; [`Error::InvalidPointer`] for bad pointer syntax.
    pub fn from_value(doc: &Value) -> Result<Self, Error> {
        let Some(entries) = doc.as_array() else {
            return Err(invalid("patch document must be an array"));
        };
        let mut ops = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.as_object().is_none() {
                return Err(invalid("each patch operation must be an object"));
            }
            let op = entry
                .get("op")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("operation is missing the \"op\" member"))?;
            let path = pointer_member(entry, "path")?;
            ops.push(match op {
                "add" => PatchOp::Add {
                    path,
                    value: value_member(entry)?,
                },
                "remove" => PatchOp::Remove { path },
                "replace" => PatchOp::Replace {
                    path,
                    value: value_member(entry)?,
                },
                "move" => PatchOp::Move {
                    from: pointer_member(entry, "from")?,
                    path,
                },
                "copy" => PatchOp::Copy {
                    from: pointer_member(entry, "from")?,
                    path,
                },
                "test" => PatchOp::Test {
                    path,
                    value: value_member(entry)?,
                },
                other => return Err(invalid(&format!("unknown op {other:?}"))),
            });
        }
        Ok(Self { ops })
    }

    /// The wire form of the patch, as a [`Value`] array.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut out = ArrayBuilder::new();
        for op in &self.ops {
            let entry = match op {
                PatchOp::Add { path, value } => ObjectBuilder::new()
                    .add("op", "add")
                    .add("path", path.as_str())
                    .add("value", value.clone()),
                PatchOp::Remove { path } => ObjectBuilder::new()
                    .add("op", "remove")
                    .add("path", path.as_str()),
                PatchOp::Replace { path, value } => ObjectBuilder::new()
                    .add("op", "replace")
                    .add("path", path.as_str())
                    .add("value", value.clone()),
                PatchOp::Move { from, path } => ObjectBuilder::new()
                    .add("op", "move")
                    .add("from", from.as_str())
                    .add("path", path.as_str()),
                PatchOp::Copy { from, path } => ObjectBuilder::new()
                    .add("op", "copy")
                    .add("from", from.as_str())
                    .add("path", path.as_str()),
                PatchOp::Test { path, value } => ObjectBuilder::new()
                    .add("op", "test")
                    .add("path", path.as_str())
                    .add("value", value.clone()),
            };
            out = out.add(entry);
        }
        out.build()
    }

    /// Applies every operation in order, producing a new tree.
    ///
    /// # Errors
    ///
    /// The first failing operation's error. On failure `target` is untouched
    /// and no partial result escapes.
    pub fn apply(&self, target: &Value) -> Result<Value, Error> {
        let mut working = target.clone();
        for op in &self.ops {
            apply_op(&mut working, op)?;
        }
        Ok(working)
    }
}

fn apply_op(working: &mut Value, op: &PatchOp) -> Result<(), Error> {
    match op {
        PatchOp::Add { path, value } => add(working, path, value.clone()),
        PatchOp::Remove { path } => take(working, path).map(drop),
        PatchOp::Replace { path, value } => {
            let slot = resolve_mut(working, path, path.tokens())?;
            *slot = value.clone();
            Ok(())
        }
        PatchOp::Move { from, path } => {
            if is_proper_prefix(from, path) {
                return Err(invalid("cannot move a value into its own descendant"));
            }
            if from == path {
                // A no-op, but the source must still resolve.
                from.evaluate(working)?;
                return Ok(());
            }
            let moved = take(working, from)?;
            add(working, path, moved)
        }
        PatchOp::Copy { from, path } => {
            let copied = from.evaluate(working)?.clone();
            add(working, path, copied)
        }
        PatchOp::Test { path, value } => {
            let found = path.evaluate(working)?;
            if found == value {
                Ok(())
            } else {
                Err(Error::TestFailed {
                    pointer: path.as_str().to_string(),
                })
            }
        }
    }
}

/// Inserts `value` at `path`. Object keys insert-or-overwrite (an overwritten
/// key keeps its position); array indices insert before the index, `-`
/// appends, and an index equal to the length appends too.
fn add(root: &mut Value, path: &Pointer, value: Value) -> Result<(), Error> {
    if path.is_root() {
        *root = value;
        return Ok(());
    }
    let tokens = path.tokens();
    let (parents, last) = tokens.split_at(tokens.len() - 1);
    let parent = resolve_mut(root, path, parents)?;
    match parent {
        Value::Object(map) => {
            map.insert(last[0].clone(), value);
            Ok(())
        }
        Value::Array(items) => {
            if last[0] == "-" {
                items.push(value);
                return Ok(());
            }
            let index = array_index(&last[0])
                .filter(|&i| i <= items.len())
                .ok_or_else(|| path.not_found())?;
            items.insert(index, value);
            Ok(())
        }
        _ => Err(path.not_found()),
    }
}

/// Removes and returns the value at `path`. Array elements after it shift
/// left; object removal preserves the order of the remaining keys.
fn take(root: &mut Value, path: &Pointer) -> Result<Value, Error> {
    if path.is_root() {
        return Err(invalid("cannot remove the whole document"));
    }
    let tokens = path.tokens();
    let (parents, last) = tokens.split_at(tokens.len() - 1);
    let parent = resolve_mut(root, path, parents)?;
    match parent {
        Value::Object(map) => map.shift_remove(&last[0]).ok_or_else(|| path.not_found()),
        Value::Array(items) => {
            let index = array_index(&last[0])
                .filter(|&i| i < items.len())
                .ok_or_else(|| path.not_found())?;
            Ok(items.remove(index))
        }
        _ => Err(path.not_found()),
    }
}

fn resolve_mut<'v>(
    root: &'v mut Value,
    path: &Pointer,
    tokens: &[String],
) -> Result<&'v mut Value, Error> {
    let mut current = root;
    for token in tokens {
        current = match current {
            Value::Object(map) => map.get_mut(token).ok_or_else(|| path.not_found())?,
            Value::Array(items) => array_index(token)
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| path.not_found())?,
            _ => return Err(path.not_found()),
        };
    }
    Ok(current)
}

fn is_proper_prefix(from: &Pointer, path: &Pointer) -> bool {
    from.tokens().len() < path.tokens().len()
        && path.tokens()[..from.tokens().len()] == *from.tokens()
}

fn invalid(detail: &str) -> Error {
    Error::InvalidPatch {
        detail: detail.to_string(),
    }
}

fn pointer_member(entry: &Value, member: &'static str) -> Result<Pointer, Error> {
    let text = entry
        .get(member)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(&format!("operation is missing the {member:?} member")))?;
    Pointer::parse(text)
}

fn value_member(entry: &Value) -> Result<Value, Error> {
    entry
        .get("value")
        .cloned()
        .ok_or_else(|| invalid("operation is missing the \"value\" member"))
}

/// Fluent construction of a [`Patch`], mirroring hand-written patch
/// documents. Pointer strings are parsed by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct PatchBuilder {
    ops: Vec<RawOp>,
}

#[derive(Debug)]
enum RawOp {
    Add(String, Value),
    Remove(String),
    Replace(String, Value),
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test(String, Value),
}

impl PatchBuilder {
    /// Creates an empty patch builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an `add` operation.
    #[must_use]
    pub fn add(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.ops.push(RawOp::Add(path.to_string(), value.into()));
        self
    }

    /// Appends a `remove` operation.
    #[must_use]
    pub fn remove(mut self, path: &str) -> Self {
        self.ops.push(RawOp::Remove(path.to_string()));
        self
    }

    /// Appends a `replace` operation.
    #[must_use]
    pub fn replace(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.ops.push(RawOp::Replace(path.to_string(), value.into()));
        self
    }

    /// Appends a `move` operation taking the value at `from` to `path`.
    #[must_use]
    pub fn move_value(mut self, from: &str, path: &str) -> Self {
        self.ops.push(RawOp::Move {
            from: from.to_string(),
            path: path.to_string(),
        });
        self
    }

    /// Appends a `copy` operation copying the value at `from` to `path`.
    #[must_use]
    pub fn copy(mut self, from: &str, path: &str) -> Self {
        self.ops.push(RawOp::Copy {
            from: from.to_string(),
            path: path.to_string(),
        });
        self
    }

    /// Appends a `test` operation.
    #[must_use]
    pub fn test(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.ops.push(RawOp::Test(path.to_string(), value.into()));
        self
    }

    /// Consumes the builder, parsing every pointer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPointer`] for any malformed pointer string.
    pub fn build(self) -> Result<Patch, Error> {
        let mut ops = Vec::with_capacity(self.ops.len());
        for raw in self.ops {
            ops.push(match raw {
                RawOp::Add(path, value) => PatchOp::Add {
                    path: Pointer::parse(&path)?,
                    value,
                },
                RawOp::Remove(path) => PatchOp::Remove {
                    path: Pointer::parse(&path)?,
                },
                RawOp::Replace(path, value) => PatchOp::Replace {
                    path: Pointer::parse(&path)?,
                    value,
                },
                RawOp::Move { from, path } => PatchOp::Move {
                    from: Pointer::parse(&from)?,
                    path: Pointer::parse(&path)?,
                },
                RawOp::Copy { from, path } => PatchOp::Copy {
                    from: Pointer::parse(&from)?,
                    path: Pointer::parse(&path)?,
                },
                RawOp::Test(path, value) => PatchOp::Test {
                    path: Pointer::parse(&path)?,
                    value,
                },
            });
        }
        Ok(Patch { ops })
    }
}
