//! Recursive-descent JSON parser.
//!
//! Converts a UTF-8 string into a [`Value`] tree in a single pass. The
//! parser peeks the next non-whitespace byte and dispatches on it:
//!
//! - `n`, `t`, `f` → exact literal match (`null`, `true`, `false`)
//! - `-` or a digit → number (`Int` unless the lexeme has `.`, `e` or `E`)
//! - `"` → string
//! - `[` / `{` → array / object, each one level deeper
//!
//! # Key design decisions
//!
//! - **Byte cursor**: `pos` only moves forward. Every error reports the
//!   offset at which it was detected; there is no recovery.
//! - **Depth counter**: incremented on entry to each array/object and
//!   checked against [`Limits::max_depth`], so hostile nesting fails with
//!   `MaxDepthExceeded` instead of overflowing the stack.
//! - **Narrow escapes**: only `\n \t \r \" \\` are understood. The
//!   serializer also writes `\b`, `\f` and `\u00XX`, which this parser
//!   rejects with `InvalidEscape`.
//! - **Integers**: lexemes without `.`/`e`/`E` become `Int(i32)` when they
//!   fit. Anything wider becomes `Double` instead of wrapping around.

use crate::error::{JsonError, Result};
use crate::limits::Limits;
use crate::value::{Array, Object, Value};
use std::str::FromStr;
use tracing::{debug, trace};

/// Parse a JSON document with the default [`Limits`].
///
/// Empty input fails with [`JsonError::EmptyInput`] before any parsing
/// starts. Only whitespace may follow the root value.
///
/// ```
/// use tinyjson_core::parse;
///
/// let doc = parse(r#"{"name":"example","version":1,"enabled":true}"#).unwrap();
/// assert_eq!(doc["name"], "example");
/// assert_eq!(doc["version"], 1);
/// assert_eq!(doc["enabled"], true);
/// ```
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).parse()
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Single-use parser over one input string.
pub struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    limits: Limits,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Run the parser to completion.
    pub fn parse(mut self) -> Result<Value> {
        let result = self.parse_document();
        match &result {
            Ok(value) => trace!(
                bytes = self.bytes.len(),
                root = %value.value_type(),
                "parsed JSON document"
            ),
            Err(err) => debug!(
                bytes = self.bytes.len(),
                offset = ?err.offset(),
                error = %err,
                "failed to parse JSON document"
            ),
        }
        result
    }

    fn parse_document(&mut self) -> Result<Value> {
        if self.text.is_empty() {
            return Err(JsonError::EmptyInput);
        }
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(JsonError::TrailingCharacters { offset: self.pos });
        }
        Ok(value)
    }

    /// Dispatch on the next non-whitespace byte.
    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_token()? {
            b'n' => self.parse_literal("null", Value::Null),
            b't' => self.parse_literal("true", Value::Bool(true)),
            b'f' => self.parse_literal("false", Value::Bool(false)),
            b'-' | b'0'..=b'9' => self.parse_number(),
            b'"' => self.parse_string().map(Value::String),
            b'[' => self.parse_array(),
            b'{' => self.parse_object(),
            _ => Err(self.invalid_character()),
        }
    }

    fn parse_literal(&mut self, literal: &'static str, value: Value) -> Result<Value> {
        for expected in literal.bytes() {
            match self.current() {
                Some(b) if b == expected => self.pos += 1,
                Some(_) => return Err(self.invalid_character()),
                None => return Err(JsonError::UnexpectedEnd { offset: self.pos }),
            }
        }
        Ok(value)
    }

    /// `-? digit+ (. digit+)? ([eE] [+-]? digit+)?`
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.current() == Some(b'-') {
            self.pos += 1;
        }
        self.expect_digits()?;

        let mut is_double = false;
        if self.current() == Some(b'.') {
            self.pos += 1;
            self.expect_digits()?;
            is_double = true;
        }
        if matches!(self.current(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.current(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.expect_digits()?;
            is_double = true;
        }

        let lexeme = &self.text[start..self.pos];
        if !is_double {
            if let Ok(n) = lexeme.parse::<i32>() {
                return Ok(Value::Int(n));
            }
        }
        // Out-of-range literals like 1e400 parse to infinity, which has no
        // JSON spelling.
        match lexeme.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Double(f)),
            _ => Err(JsonError::InvalidNumber { offset: start }),
        }
    }

    fn expect_digits(&mut self) -> Result<()> {
        match self.current() {
            Some(b) if b.is_ascii_digit() => {}
            Some(_) => return Err(JsonError::InvalidNumber { offset: self.pos }),
            None => return Err(JsonError::UnexpectedEnd { offset: self.pos }),
        }
        while matches!(self.current(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        Ok(())
    }

    /// Parse a quoted string. The cursor must be on the opening quote.
    ///
    /// Unescaped runs are copied as whole slices; the slice boundaries are
    /// always ASCII quote/backslash bytes, so they fall on char boundaries.
    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run = self.pos;

        loop {
            match self.current() {
                None => return Err(JsonError::UnterminatedString { offset: start }),
                Some(b'"') => {
                    out.push_str(&self.text[run..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[run..self.pos]);
                    let escape_at = self.pos;
                    self.pos += 1;
                    let unescaped = match self.current() {
                        None => return Err(JsonError::UnterminatedString { offset: start }),
                        Some(b'n') => '\n',
                        Some(b't') => '\t',
                        Some(b'r') => '\r',
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(_) => {
                            return Err(JsonError::InvalidEscape {
                                found: self.char_at(self.pos),
                                offset: escape_at,
                            })
                        }
                    };
                    out.push(unescaped);
                    self.pos += 1;
                    run = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut items = Array::new();

        if self.peek_token()? == b']' {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            match self.peek_token()? {
                b',' => self.pos += 1,
                b']' => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.expected_delimiter("',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut map = Object::new();

        if self.peek_token()? == b'}' {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            if self.peek_token()? != b'"' {
                return Err(JsonError::ExpectedKey {
                    found: self.char_at(self.pos),
                    offset: self.pos,
                });
            }
            let key_offset = self.pos;
            let key = self.parse_string()?;
            if map.contains_key(&key) {
                return Err(JsonError::DuplicateKey {
                    key,
                    offset: key_offset,
                });
            }

            if self.peek_token()? != b':' {
                return Err(self.expected_delimiter("':'"));
            }
            self.pos += 1;

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.peek_token()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.expected_delimiter("',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Account for one more level of nesting. The cursor is on the opening
    /// bracket, which is the offset reported on failure.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(JsonError::MaxDepthExceeded {
                depth: self.depth,
                max: self.limits.max_depth,
                offset: self.pos,
            });
        }
        Ok(())
    }

    /// Skip whitespace and return the next byte without consuming it.
    fn peek_token(&mut self) -> Result<u8> {
        self.skip_whitespace();
        self.current()
            .ok_or(JsonError::UnexpectedEnd { offset: self.pos })
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The character starting at `offset`, for error messages.
    fn char_at(&self, offset: usize) -> char {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn invalid_character(&self) -> JsonError {
        JsonError::InvalidCharacter {
            found: self.char_at(self.pos),
            offset: self.pos,
        }
    }

    fn expected_delimiter(&self, expected: &'static str) -> JsonError {
        JsonError::ExpectedDelimiter {
            expected,
            found: self.char_at(self.pos),
            offset: self.pos,
        }
    }
}
