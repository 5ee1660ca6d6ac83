//! Error types shared by every engine in the crate.
//!
//! Each failure mode of the processing model is a distinct, inspectable
//! [`Error`] variant; nothing is swallowed and nothing retries internally.

use thiserror::Error;

/// A line/column position within the input text, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number within the line, starting at 1.
    pub column: usize,
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn at(position: &Option<Position>) -> String {
    position.map_or_else(String::new, |p| format!(" at {p}"))
}

/// Lexical-level detail carried by [`Error::Malformed`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot start or continue any JSON token.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    /// A backslash escape other than `\" \\ \/ \b \f \n \r \t \uXXXX`.
    #[error("invalid escape character {0:?}")]
    InvalidEscape(char),
    /// A `\u` escape whose digits do not form a Unicode scalar value.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A surrogate `\uXXXX` without its matching pair half.
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u32),
    /// An unescaped control character inside a string literal.
    #[error("unescaped control character in string literal")]
    ControlCharacterInString,
    /// A number literal with a leading zero, e.g. `042`.
    #[error("leading zero in number literal")]
    LeadingZero,
    /// A number literal missing required digits, e.g. `-`, `1.`, `2e`.
    #[error("expected a digit in number literal")]
    ExpectedDigit,
    /// Input ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Any failure surfaced by the lexer, parser, generator, pointer, patch or
/// merge-patch engines.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The input does not match the JSON token grammar.
    #[error("malformed input at {position}: {kind}")]
    Malformed {
        /// What the lexer choked on.
        kind: SyntaxError,
        /// Where it choked.
        position: Position,
    },

    /// A well-formedness violation: bad token ordering while parsing, or an
    /// illegal write sequence while generating. The position is present for
    /// parse errors and absent for generator errors.
    #[error("structural error{}: {detail}", at(.position))]
    Structural {
        /// Human-readable description of the violation.
        detail: String,
        /// Offending position in the input, when parsing.
        position: Option<Position>,
    },

    /// A value accessor was called outside its valid event context.
    #[error("invalid state: {detail}")]
    InvalidState {
        /// Which access was attempted and why it is out of context.
        detail: &'static str,
    },

    /// [`Parser::next_event`](crate::Parser::next_event) was called after the
    /// final event of the document.
    #[error("no more parse events")]
    NoMoreEvents,

    /// [`Generator::close`](crate::Generator::close) was called before the
    /// document was complete.
    #[error("incomplete document: {detail}")]
    IncompleteDocument {
        /// What is still missing.
        detail: String,
    },

    /// The pointer string is not valid RFC 6901 syntax.
    #[error("invalid pointer {pointer:?}: {detail}")]
    InvalidPointer {
        /// The offending pointer string.
        pointer: String,
        /// Which syntax rule it breaks.
        detail: &'static str,
    },

    /// The pointer does not address an existing value in the target document.
    #[error("no value at pointer {pointer:?}")]
    PathNotFound {
        /// The pointer that failed to resolve.
        pointer: String,
    },

    /// The patch document, or one of its operations, is invalid.
    #[error("invalid patch: {detail}")]
    InvalidPatch {
        /// What makes the patch unusable.
        detail: String,
    },

    /// A `test` patch operation found a value that is not deep-equal to the
    /// expected one.
    #[error("patch test failed at pointer {pointer:?}")]
    TestFailed {
        /// Path of the failed comparison.
        pointer: String,
    },

    /// The underlying output sink rejected a write.
    #[error("write to output sink failed")]
    Sink,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Sink
    }
}
