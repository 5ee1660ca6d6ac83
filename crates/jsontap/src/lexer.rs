//! The lexer: turns character input into primitive JSON tokens.
//!
//! Forward-only and lazy: each [`Lexer::next_token`] call consumes exactly
//! one token's worth of input. Tokens are never re-emitted; callers that need
//! to re-scan must keep their own copy of the text.

use core::{iter::Peekable, str::Chars};

use crate::{
    error::{Error, Position, SyntaxError},
    number::Number,
};

/// One primitive JSON token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    Num(Number),
    True,
    False,
    Null,
}

#[derive(Debug)]
pub(crate) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unconsumed character.
    pub(crate) fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Produces the next token, `None` on clean end of input.
    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, Error> {
        self.skip_whitespace();
        let Some(&c) = self.chars.peek() else {
            return Ok(None);
        };
        let token = match c {
            '{' => self.punctuator(Token::BeginObject),
            '}' => self.punctuator(Token::EndObject),
            '[' => self.punctuator(Token::BeginArray),
            ']' => self.punctuator(Token::EndArray),
            ':' => self.punctuator(Token::Colon),
            ',' => self.punctuator(Token::Comma),
            '"' => self.string()?,
            '-' | '0'..='9' => self.number()?,
            't' => self.literal("true", Token::True)?,
            'f' => self.literal("false", Token::False)?,
            'n' => self.literal("null", Token::Null)?,
            other => return Err(self.err(SyntaxError::InvalidCharacter(other))),
        };
        Ok(Some(token))
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        // RFC 8259 insignificant whitespace only.
        while matches!(self.chars.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    fn punctuator(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn literal(&mut self, expected: &'static str, token: Token) -> Result<Token, Error> {
        for want in expected.chars() {
            match self.chars.peek() {
                Some(&c) if c == want => {
                    self.advance();
                }
                Some(&c) => return Err(self.err(SyntaxError::InvalidCharacter(c))),
                None => return Err(self.err(SyntaxError::UnexpectedEndOfInput)),
            }
        }
        Ok(token)
    }

    fn string(&mut self) -> Result<Token, Error> {
        self.advance(); // opening quote
        let mut buf = String::new();
        loop {
            match self.chars.peek() {
                None => return Err(self.err(SyntaxError::UnexpectedEndOfInput)),
                Some('"') => {
                    self.advance();
                    return Ok(Token::Str(buf));
                }
                Some('\\') => {
                    self.advance();
                    self.escape(&mut buf)?;
                }
                Some(&c) if (c as u32) < 0x20 => {
                    return Err(self.err(SyntaxError::ControlCharacterInString));
                }
                Some(_) => {
                    let c = self.advance().unwrap_or_default();
                    buf.push(c);
                }
            }
        }
    }

    fn escape(&mut self, buf: &mut String) -> Result<(), Error> {
        match self.chars.peek() {
            None => Err(self.err(SyntaxError::UnexpectedEndOfInput)),
            Some(&c @ ('"' | '\\' | '/')) => {
                self.advance();
                buf.push(c);
                Ok(())
            }
            Some('b') => self.push_escaped(buf, '\u{0008}'),
            Some('f') => self.push_escaped(buf, '\u{000C}'),
            Some('n') => self.push_escaped(buf, '\n'),
            Some('r') => self.push_escaped(buf, '\r'),
            Some('t') => self.push_escaped(buf, '\t'),
            Some('u') => {
                self.advance();
                let code = self.unicode_escape()?;
                buf.push(code);
                Ok(())
            }
            Some(&c) => Err(self.err(SyntaxError::InvalidEscape(c))),
        }
    }

    fn push_escaped(&mut self, buf: &mut String, decoded: char) -> Result<(), Error> {
        self.advance();
        buf.push(decoded);
        Ok(())
    }

    /// Decodes `XXXX` (and a following `\uXXXX` for surrogate pairs); the
    /// leading `\u` has already been consumed.
    fn unicode_escape(&mut self) -> Result<char, Error> {
        let first = self.hex_quad()?;
        let code = match first {
            0xD800..=0xDBFF => {
                // High surrogate: the low half must follow immediately.
                if self.chars.peek() != Some(&'\\') {
                    return Err(self.err(SyntaxError::UnpairedSurrogate(first)));
                }
                self.advance();
                if self.chars.peek() != Some(&'u') {
                    return Err(self.err(SyntaxError::UnpairedSurrogate(first)));
                }
                self.advance();
                let second = self.hex_quad()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.err(SyntaxError::UnpairedSurrogate(first)));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.err(SyntaxError::UnpairedSurrogate(first))),
            scalar => scalar,
        };
        char::from_u32(code).ok_or_else(|| self.err(SyntaxError::InvalidUnicodeEscape))
    }

    fn hex_quad(&mut self) -> Result<u32, Error> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            match self.chars.peek() {
                None => return Err(self.err(SyntaxError::UnexpectedEndOfInput)),
                Some(&c) => {
                    let digit = c
                        .to_digit(16)
                        .ok_or_else(|| self.err(SyntaxError::InvalidUnicodeEscape))?;
                    self.advance();
                    code = (code << 4) | digit;
                }
            }
        }
        Ok(code)
    }

    fn number(&mut self) -> Result<Token, Error> {
        let mut raw = String::new();
        if self.chars.peek() == Some(&'-') {
            self.advance();
            raw.push('-');
        }

        match self.chars.peek() {
            Some('0') => {
                self.advance();
                raw.push('0');
                if self.chars.peek().is_some_and(char::is_ascii_digit) {
                    return Err(self.err(SyntaxError::LeadingZero));
                }
            }
            Some(&c) if c.is_ascii_digit() => {
                self.digits(&mut raw);
            }
            Some(_) | None => return Err(self.err(SyntaxError::ExpectedDigit)),
        }

        if self.chars.peek() == Some(&'.') {
            self.advance();
            raw.push('.');
            if self.digits(&mut raw) == 0 {
                return Err(self.err(SyntaxError::ExpectedDigit));
            }
        }

        if matches!(self.chars.peek(), Some('e' | 'E')) {
            let e = self.advance().unwrap_or('e');
            raw.push(e);
            if matches!(self.chars.peek(), Some('+' | '-')) {
                let sign = self.advance().unwrap_or('+');
                raw.push(sign);
            }
            if self.digits(&mut raw) == 0 {
                return Err(self.err(SyntaxError::ExpectedDigit));
            }
        }

        Ok(Token::Num(Number::from_lexed(raw)))
    }

    fn digits(&mut self, raw: &mut String) -> usize {
        let mut count = 0;
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.advance();
            raw.push(c);
            count += 1;
        }
        count
    }

    fn err(&self, kind: SyntaxError) -> Error {
        Error::Malformed {
            kind,
            position: self.position(),
        }
    }
}
