//! The pull parser: a forward-only, one-event-at-a-time JSON reader.
//!
//! [`Parser::next_event`] pulls exactly as much of the underlying lexer as
//! needed to produce one [`Event`]; nothing is parsed ahead speculatively.
//! Once an error is returned the cursor is spent and must be discarded.
//!
//! # Examples
//!
//! ```
//! use jsontap::{Event, Parser};
//!
//! let mut parser = Parser::new(r#"{"key": [null, true]}"#);
//! assert_eq!(parser.next_event().unwrap(), Event::StartObject);
//! assert_eq!(parser.next_event().unwrap(), Event::Key("key".into()));
//! assert_eq!(parser.next_event().unwrap(), Event::StartArray);
//! ```

use crate::{
    builder::{ArrayBuilder, ObjectBuilder},
    error::Error,
    lexer::{Lexer, Token},
    number::Number,
    value::Value,
};

/// One structural or value event pulled from the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A `{` opened an object.
    StartObject,
    /// A `}` closed the innermost object.
    EndObject,
    /// A `[` opened an array.
    StartArray,
    /// A `]` closed the innermost array.
    EndArray,
    /// An object key; always immediately followed by that key's value event.
    Key(String),
    /// A string value.
    String(String),
    /// A number value.
    Number(Number),
    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeDocument,
    /// After `:` or after `,` inside an array; a value is mandatory.
    ExpectValue,
    /// Just after `[`; a value or `]`.
    BeforeArrayValue,
    /// Just after `{`; a key or `}`.
    BeforeKey,
    /// After `,` inside an object; a key is mandatory.
    ExpectKey,
    /// A key was produced; `:` must follow.
    AfterKey,
    AfterValueInObject,
    AfterValueInArray,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// The pull parser. See the [module docs](self) for the event contract.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    state: State,
    stack: Vec<Container>,
    current: Option<Event>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a complete JSON text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            state: State::BeforeDocument,
            stack: Vec::new(),
            current: None,
        }
    }

    /// Whether the document still has events to produce.
    ///
    /// This reports on the event stream only; trailing garbage after the
    /// document is detected by the [`next_event`](Self::next_event) call that
    /// follows the final event.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !matches!(self.state, State::Done | State::Failed)
    }

    /// Advances the state machine and returns the next event.
    ///
    /// # Errors
    ///
    /// [`Error::NoMoreEvents`] past the final event, [`Error::Malformed`] on
    /// lexical errors, [`Error::Structural`] on well-formedness violations
    /// (including trailing input after the document).
    pub fn next_event(&mut self) -> Result<Event, Error> {
        loop {
            match self.state {
                State::Failed => {
                    return Err(Error::Structural {
                        detail: "parser is no longer usable after an error".to_string(),
                        position: None,
                    });
                }
                State::Done => {
                    return match self.token()? {
                        Some(_) => Err(self.fail_structural("multiple top-level JSON values")),
                        None => Err(Error::NoMoreEvents),
                    };
                }
                _ => {}
            }

            let token = self.token()?;
            if let Some(event) = self.step(token)? {
                self.current = Some(event.clone());
                return Ok(event);
            }
        }
    }

    /// The string of the current [`Event::Key`] or [`Event::String`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the current event is anything else.
    pub fn string(&self) -> Result<&str, Error> {
        match &self.current {
            Some(Event::Key(s) | Event::String(s)) => Ok(s),
            _ => Err(Error::InvalidState {
                detail: "string() is valid only immediately after a key or string event",
            }),
        }
    }

    /// The number of the current [`Event::Number`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the current event is anything else.
    pub fn number(&self) -> Result<&Number, Error> {
        match &self.current {
            Some(Event::Number(n)) => Ok(n),
            _ => Err(Error::InvalidState {
                detail: "number() is valid only immediately after a number event",
            }),
        }
    }

    /// The current number as an exact `i64`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] outside a number event, or when the number is
    /// not an integer that fits an `i64`.
    pub fn i64_value(&self) -> Result<i64, Error> {
        self.number()?.as_i64().ok_or(Error::InvalidState {
            detail: "number is not an exact 64-bit integer",
        })
    }

    /// The current number as an `f64`, possibly losing precision.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] outside a number event.
    pub fn f64_value(&self) -> Result<f64, Error> {
        Ok(self.number()?.as_f64())
    }

    /// Materializes a [`Value`] from the current position onward.
    ///
    /// Consumes exactly the events of one value: a scalar event, or a whole
    /// container including its close event. Containers are assembled through
    /// the [builders](crate::ObjectBuilder), each nested builder terminally
    /// built before insertion into its parent.
    ///
    /// # Errors
    ///
    /// Any parse error of the underlying events, or [`Error::InvalidState`]
    /// when the parser is positioned on an object key rather than a value.
    pub fn read_value(&mut self) -> Result<Value, Error> {
        let event = self.next_event()?;
        self.value_from(event)
    }

    fn value_from(&mut self, event: Event) -> Result<Value, Error> {
        match event {
            Event::StartObject => {
                let mut builder = ObjectBuilder::new();
                loop {
                    match self.next_event()? {
                        Event::EndObject => return Ok(builder.build()),
                        Event::Key(key) => {
                            let event = self.next_event()?;
                            let value = self.value_from(event)?;
                            builder = builder.add(key, value);
                        }
                        // The state machine yields only keys and the close
                        // event between object values.
                        _ => unreachable!("object member without a key event"),
                    }
                }
            }
            Event::StartArray => {
                let mut builder = ArrayBuilder::new();
                loop {
                    match self.next_event()? {
                        Event::EndArray => return Ok(builder.build()),
                        event => {
                            let value = self.value_from(event)?;
                            builder = builder.add(value);
                        }
                    }
                }
            }
            Event::String(s) => Ok(Value::String(s)),
            Event::Number(n) => Ok(Value::Number(n)),
            Event::True => Ok(Value::Bool(true)),
            Event::False => Ok(Value::Bool(false)),
            Event::Null => Ok(Value::Null),
            Event::Key(_) | Event::EndObject | Event::EndArray => Err(Error::InvalidState {
                detail: "no value begins at the current parser position",
            }),
        }
    }

    fn token(&mut self) -> Result<Option<Token>, Error> {
        self.lexer.next_token().map_err(|e| {
            self.state = State::Failed;
            e
        })
    }

    /// Feeds one token to the state machine; `None` means the token produced
    /// no event (`:` and `,`) and another token is needed.
    fn step(&mut self, token: Option<Token>) -> Result<Option<Event>, Error> {
        let Some(token) = token else {
            return Err(self.end_of_document());
        };

        match self.state {
            State::BeforeDocument | State::ExpectValue | State::BeforeArrayValue => {
                match token {
                    Token::BeginObject => {
                        self.stack.push(Container::Object);
                        self.state = State::BeforeKey;
                        Ok(Some(Event::StartObject))
                    }
                    Token::BeginArray => {
                        self.stack.push(Container::Array);
                        self.state = State::BeforeArrayValue;
                        Ok(Some(Event::StartArray))
                    }
                    Token::EndArray if self.state == State::BeforeArrayValue => {
                        Ok(Some(self.close(Container::Array)?))
                    }
                    Token::EndArray => {
                        if self.state == State::ExpectValue
                            && self.stack.last() == Some(&Container::Array)
                        {
                            Err(self.fail_structural("trailing comma before ']'"))
                        } else {
                            Err(self.fail_structural("expected a value"))
                        }
                    }
                    Token::Str(s) => self.value_event(Event::String(s)),
                    Token::Num(n) => self.value_event(Event::Number(n)),
                    Token::True => self.value_event(Event::True),
                    Token::False => self.value_event(Event::False),
                    Token::Null => self.value_event(Event::Null),
                    Token::EndObject | Token::Colon | Token::Comma => {
                        Err(self.fail_structural("expected a value"))
                    }
                }
            }
            State::BeforeKey | State::ExpectKey => match token {
                Token::Str(key) => {
                    self.state = State::AfterKey;
                    Ok(Some(Event::Key(key)))
                }
                Token::EndObject if self.state == State::BeforeKey => {
                    Ok(Some(self.close(Container::Object)?))
                }
                Token::EndObject => Err(self.fail_structural("trailing comma before '}'")),
                _ => Err(self.fail_structural("expected an object key")),
            },
            State::AfterKey => match token {
                Token::Colon => {
                    self.state = State::ExpectValue;
                    Ok(None)
                }
                _ => Err(self.fail_structural("expected ':' after object key")),
            },
            State::AfterValueInObject => match token {
                Token::Comma => {
                    self.state = State::ExpectKey;
                    Ok(None)
                }
                Token::EndObject => Ok(Some(self.close(Container::Object)?)),
                _ => Err(self.fail_structural("expected ',' or '}' after object value")),
            },
            State::AfterValueInArray => match token {
                Token::Comma => {
                    self.state = State::ExpectValue;
                    Ok(None)
                }
                Token::EndArray => Ok(Some(self.close(Container::Array)?)),
                _ => Err(self.fail_structural("expected ',' or ']' after array element")),
            },
            State::Done | State::Failed => unreachable!("handled before lexing"),
        }
    }

    fn value_event(&mut self, event: Event) -> Result<Option<Event>, Error> {
        self.after_value();
        Ok(Some(event))
    }

    fn after_value(&mut self) {
        self.state = match self.stack.last() {
            None => State::Done,
            Some(Container::Object) => State::AfterValueInObject,
            Some(Container::Array) => State::AfterValueInArray,
        };
    }

    fn close(&mut self, expected: Container) -> Result<Event, Error> {
        match self.stack.pop() {
            Some(container) if container == expected => {
                self.after_value();
                Ok(match expected {
                    Container::Object => Event::EndObject,
                    Container::Array => Event::EndArray,
                })
            }
            // Unreachable through the state machine, but cheap to report.
            _ => Err(self.fail_structural("mismatched closing bracket")),
        }
    }

    fn end_of_document(&mut self) -> Error {
        if self.state == State::BeforeDocument {
            self.fail_structural("empty document")
        } else {
            self.fail_structural("unexpected end of document")
        }
    }

    fn fail_structural(&mut self, detail: &str) -> Error {
        let position = self.lexer.position();
        self.state = State::Failed;
        Error::Structural {
            detail: detail.to_string(),
            position: Some(position),
        }
    }
}

/// Parses exactly one JSON document into a [`Value`].
///
/// # Errors
///
/// Any lexical or structural parse error, including trailing input after the
/// document.
///
/// # Examples
///
/// ```
/// use jsontap::{Value, parse};
///
/// let v = parse(r#"[1, 2, 3]"#).unwrap();
/// assert_eq!(v.as_array().map(Vec::len), Some(3));
/// ```
pub fn parse(text: &str) -> Result<Value, Error> {
    let mut parser = Parser::new(text);
    let value = parser.read_value()?;
    match parser.next_event() {
        Err(Error::NoMoreEvents) => Ok(value),
        Err(other) => Err(other),
        Ok(_) => Err(Error::Structural {
            detail: "multiple top-level JSON values".to_string(),
            position: None,
        }),
    }
}
