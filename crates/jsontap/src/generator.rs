//! The generator: a write-only mirror of the parser's event model.
//!
//! Every call emits its text immediately — there is no full-tree buffering.
//! The same container-stack discipline the parser enforces while reading is
//! enforced here while writing, so the output is well-formed JSON or the
//! offending call fails with [`Error::Structural`].
//!
//! # Examples
//!
//! ```
//! use jsontap::Generator;
//!
//! let mut out = String::new();
//! let mut g = Generator::new(&mut out);
//! g.write_start_array().unwrap().write_end().unwrap();
//! g.close().unwrap();
//! assert_eq!(out, "[]");
//! ```

use core::fmt;

use crate::{error::Error, value::Value};

#[derive(Debug)]
enum Frame {
    Object { first: bool, pending_key: bool },
    Array { first: bool },
}

/// A streaming JSON writer over any [`fmt::Write`] sink.
///
/// The generator does not own the sink's lifecycle: [`close`](Self::close)
/// finalizes the document but leaves the sink to the caller.
#[derive(Debug)]
pub struct Generator<W: fmt::Write> {
    sink: W,
    stack: Vec<Frame>,
    root_written: bool,
    closed: bool,
}

impl<W: fmt::Write> Generator<W> {
    /// Creates a generator writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            stack: Vec::new(),
            root_written: false,
            closed: false,
        }
    }

    /// Opens an object. Legal wherever a value is legal.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] when no value may be written here.
    pub fn write_start_object(&mut self) -> Result<&mut Self, Error> {
        self.before_value()?;
        self.sink.write_char('{')?;
        self.stack.push(Frame::Object {
            first: true,
            pending_key: false,
        });
        Ok(self)
    }

    /// Opens an array. Legal wherever a value is legal.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] when no value may be written here.
    pub fn write_start_array(&mut self) -> Result<&mut Self, Error> {
        self.before_value()?;
        self.sink.write_char('[')?;
        self.stack.push(Frame::Array { first: true });
        Ok(self)
    }

    /// Writes an object key. Legal only inside an object with no key pending.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] outside an object context or with a key already
    /// pending.
    pub fn write_key(&mut self, key: &str) -> Result<&mut Self, Error> {
        if self.closed {
            return Err(structural("generator is closed"));
        }
        match self.stack.last_mut() {
            Some(Frame::Object { first, pending_key }) => {
                if *pending_key {
                    return Err(structural("key already written, value expected"));
                }
                let comma = !*first;
                *first = false;
                *pending_key = true;
                if comma {
                    self.sink.write_char(',')?;
                }
                self.sink.write_char('"')?;
                write_escaped_string(key, &mut self.sink)?;
                self.sink.write_str("\":")?;
                Ok(self)
            }
            _ => Err(structural("write_key outside an object context")),
        }
    }

    /// Writes any value, containers included, at the current position.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] when no value may be written here.
    pub fn write<T: Into<Value>>(&mut self, value: T) -> Result<&mut Self, Error> {
        let value = value.into();
        self.write_value(&value)
    }

    /// Writes a `null` value.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] when no value may be written here.
    pub fn write_null(&mut self) -> Result<&mut Self, Error> {
        self.write_value(&Value::Null)
    }

    /// Writes a key/value pair inside an object: `write_key` then `write`.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] outside an object context.
    pub fn write_field<T: Into<Value>>(&mut self, key: &str, value: T) -> Result<&mut Self, Error> {
        self.write_key(key)?.write(value)
    }

    /// Writes a borrowed [`Value`] tree. Containers are streamed through the
    /// same structural machinery as the call-by-call API.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] when no value may be written here.
    pub fn write_value(&mut self, value: &Value) -> Result<&mut Self, Error> {
        match value {
            Value::Null => {
                self.before_value()?;
                self.sink.write_str("null")?;
            }
            Value::Bool(true) => {
                self.before_value()?;
                self.sink.write_str("true")?;
            }
            Value::Bool(false) => {
                self.before_value()?;
                self.sink.write_str("false")?;
            }
            Value::Number(n) => {
                self.before_value()?;
                self.sink.write_str(n.literal())?;
            }
            Value::String(s) => {
                self.before_value()?;
                self.sink.write_char('"')?;
                write_escaped_string(s, &mut self.sink)?;
                self.sink.write_char('"')?;
            }
            Value::Array(items) => {
                self.write_start_array()?;
                for item in items {
                    self.write_value(item)?;
                }
                self.write_end()?;
            }
            Value::Object(map) => {
                self.write_start_object()?;
                for (key, item) in map {
                    self.write_key(key)?;
                    self.write_value(item)?;
                }
                self.write_end()?;
            }
        }
        Ok(self)
    }

    /// Closes the innermost open container.
    ///
    /// # Errors
    ///
    /// [`Error::Structural`] with no container open, or with a key still
    /// waiting for its value.
    pub fn write_end(&mut self) -> Result<&mut Self, Error> {
        if self.closed {
            return Err(structural("generator is closed"));
        }
        match self.stack.pop() {
            None => Err(structural("write_end with no open container")),
            Some(Frame::Object { pending_key: true, .. }) => {
                Err(structural("object key has no value"))
            }
            Some(Frame::Object { .. }) => {
                self.sink.write_char('}')?;
                Ok(self)
            }
            Some(Frame::Array { .. }) => {
                self.sink.write_char(']')?;
                Ok(self)
            }
        }
    }

    /// Finalizes the document. Does not close the underlying sink.
    ///
    /// # Errors
    ///
    /// [`Error::IncompleteDocument`] with containers still open, or when
    /// nothing was written at all.
    pub fn close(&mut self) -> Result<(), Error> {
        if !self.stack.is_empty() {
            return Err(Error::IncompleteDocument {
                detail: format!("{} container(s) still open", self.stack.len()),
            });
        }
        if !self.root_written {
            return Err(Error::IncompleteDocument {
                detail: "no value has been written".to_string(),
            });
        }
        self.closed = true;
        Ok(())
    }

    /// Consumes the generator, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Comma/validity bookkeeping shared by every value write.
    fn before_value(&mut self) -> Result<(), Error> {
        if self.closed {
            return Err(structural("generator is closed"));
        }
        match self.stack.last_mut() {
            None => {
                if self.root_written {
                    return Err(structural("second top-level value"));
                }
                self.root_written = true;
                Ok(())
            }
            Some(Frame::Array { first }) => {
                let comma = !*first;
                *first = false;
                if comma {
                    self.sink.write_char(',')?;
                }
                Ok(())
            }
            Some(Frame::Object { pending_key, .. }) => {
                if *pending_key {
                    *pending_key = false;
                    Ok(())
                } else {
                    Err(structural("value inside an object requires a preceding key"))
                }
            }
        }
    }
}

fn structural(detail: &str) -> Error {
    Error::Structural {
        detail: detail.to_string(),
        position: None,
    }
}

/// Escapes `src` for inclusion in a JSON string literal (quotes excluded).
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, out: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(out, "\\u{:04X}", c as u32)?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}
