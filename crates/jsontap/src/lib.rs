//! JSON processing built around a pull parser and an immutable value model.
//!
//! The crate has three layers:
//!
//! - **Streaming**: a forward-only pull [`Parser`] yielding one [`Event`] per
//!   structural or value token, and a [`Generator`] writing the mirror-image
//!   event sequence as well-formed JSON text.
//! - **Value model**: an immutable [`Value`] tree with literal-preserving
//!   [`Number`]s, populated by [`parse`], [`Parser::read_value`], or the
//!   [`ObjectBuilder`]/[`ArrayBuilder`] scratch builders.
//! - **Addressing and editing**: RFC 6901 [`Pointer`]s, RFC 6902 [`Patch`]
//!   application, and RFC 7396 [`merge_patch`] — all producing new trees and
//!   never mutating their input.
//!
//! # Examples
//!
//! ```
//! use jsontap::{Event, Generator, Parser, PatchBuilder, Pointer, parse};
//!
//! // Streaming generation.
//! let mut text = String::new();
//! let mut g = Generator::new(&mut text);
//! g.write_start_object().unwrap();
//! g.write_field("name", "Vinc").unwrap();
//! g.write_end().unwrap();
//! g.close().unwrap();
//! assert_eq!(text, r#"{"name":"Vinc"}"#);
//!
//! // Pull parsing.
//! let mut parser = Parser::new(&text);
//! assert_eq!(parser.next_event().unwrap(), Event::StartObject);
//! assert_eq!(parser.next_event().unwrap(), Event::Key("name".into()));
//!
//! // Pointers and patches over the value model.
//! let doc = parse(&text).unwrap();
//! assert!(Pointer::parse("/name").unwrap().contains(&doc));
//! let patched = PatchBuilder::new()
//!     .replace("/name", "Paul")
//!     .build()
//!     .unwrap()
//!     .apply(&doc)
//!     .unwrap();
//! assert_eq!(patched.get("name").and_then(|v| v.as_str()), Some("Paul"));
//! ```

mod builder;
mod error;
mod generator;
mod lexer;
mod merge;
mod number;
mod parser;
mod patch;
mod pointer;
mod value;

#[cfg(test)]
mod tests;

pub use builder::{ArrayBuilder, ObjectBuilder};
pub use error::{Error, Position, SyntaxError};
pub use generator::Generator;
pub use merge::merge_patch;
pub use number::Number;
pub use parser::{Event, Parser, parse};
pub use patch::{Patch, PatchBuilder, PatchOp};
pub use pointer::Pointer;
pub use value::{Array, Map, Value};
