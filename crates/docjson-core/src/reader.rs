//! Character-stream JSON reader.
//!
//! The reader pulls one UTF-8 character at a time from a buffered stream and
//! builds a [`Value`] tree by recursive descent. A top-level document is an
//! object or an array; anything else at the top level reads as "no document".
//!
//! # Key design decisions
//!
//! - **Terminator ownership**: every value function consumes exactly its own
//!   text. Objects and arrays eat their closing delimiter; literals and
//!   numbers stop in front of the delimiter. The container loops only ever
//!   decide what to do next from a one-character peek, so a nested `}` can
//!   never close an outer scope.
//! - **Lenient structure**: separators are skipped rather than required
//!   (`{"a":1 "b":2}` and `[1,,2]` read fine) and the `:` after a key is
//!   optional. Literals match case-insensitively.
//! - **Numbers**: integral values are narrowed to `Int` when they fit 32 bits,
//!   `Long` when they fit 64 bits; everything else is a `Double`. `1.0` and
//!   `1e3` count as integral.

use std::io::{self, BufRead, BufReader, Read};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::array::JsonArray;
use crate::config::{EscapeMode, JsonConfig};
use crate::error::{JsonError, Result};
use crate::object::JsonObject;
use crate::value::{Number, Value};

/// Nesting limit; deeper input is rejected instead of exhausting the stack.
///
/// Sized so a debug build on a 2 MiB thread still has headroom at the limit.
pub const MAX_DEPTH: usize = 128;

/// Upper bound (exclusive) of doubles that convert to `i64` without saturating.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Reads JSON documents from a byte stream.
///
/// Dropping the reader releases the stream; [`into_inner`](Self::into_inner)
/// hands it back instead.
pub struct JsonReader<R> {
    input: BufReader<R>,
    peeked: Option<char>,
    escape_mode: EscapeMode,
    depth: usize,
    line: usize,
    column: usize,
}

impl<R: Read> JsonReader<R> {
    /// A reader with standard escaping.
    pub fn new(input: R) -> Self {
        Self::with_escape_mode(input, EscapeMode::Standard)
    }

    /// A reader using the escape mode of `config`. Indentation is ignored.
    pub fn with_config(input: R, config: &JsonConfig) -> Self {
        Self::with_escape_mode(input, config.escape_mode)
    }

    /// A reader with an explicit escape mode.
    pub fn with_escape_mode(input: R, escape_mode: EscapeMode) -> Self {
        Self {
            input: BufReader::new(input),
            peeked: None,
            escape_mode,
            depth: 0,
            line: 1,
            column: 0,
        }
    }

    /// Line and column (1-based) of the next unread character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column + 1)
    }

    /// Gives back the underlying stream. Buffered but unread input is lost.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }

    /// Reads the next document.
    ///
    /// Returns `Ok(None)` at end of input, or when the next non-whitespace
    /// character cannot start an object or array (that character is left
    /// unread).
    pub fn read(&mut self) -> Result<Option<Value>> {
        self.depth = 0;
        self.skip_whitespace()?;
        let value = match self.peek()? {
            Some('{') => {
                self.bump()?;
                Value::Object(self.parse_object()?)
            }
            Some('[') => {
                self.bump()?;
                Value::Array(self.parse_array()?)
            }
            Some(c) => {
                trace!(found = ?c, "no JSON document at top level");
                return Ok(None);
            }
            None => return Ok(None),
        };
        debug!(kind = value.kind(), line = self.line, "read JSON document");
        Ok(Some(value))
    }

    /// Reads the next document and requires it to be an object.
    pub fn read_object(&mut self) -> Result<JsonObject> {
        match self.read()? {
            Some(Value::Object(obj)) => Ok(obj),
            Some(other) => Err(root_mismatch("object", &other)),
            None => Err(self.malformed("expected a JSON object")),
        }
    }

    /// Reads the next document and requires it to be an array.
    pub fn read_array(&mut self) -> Result<JsonArray> {
        match self.read()? {
            Some(Value::Array(arr)) => Ok(arr),
            Some(other) => Err(root_mismatch("array", &other)),
            None => Err(self.malformed("expected a JSON array")),
        }
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// Object body; the opening `{` has been consumed, the closing `}` is consumed here.
    fn parse_object(&mut self) -> Result<JsonObject> {
        self.enter()?;
        let mut obj = JsonObject::new();
        loop {
            self.skip_whitespace()?;
            match self.peek()? {
                Some(',') => self.bump()?,
                Some('}') => {
                    self.bump()?;
                    break;
                }
                Some('"') => {
                    self.bump()?;
                    let key = self.parse_string()?;
                    self.skip_whitespace()?;
                    if self.peek()? == Some(':') {
                        self.bump()?;
                    }
                    let value = self.parse_value()?;
                    obj.put(key, value);
                }
                Some(c) => {
                    return Err(self.malformed(format!(
                        "expected '\"' or '}}' in object, found {c:?}"
                    )))
                }
                None => return Err(self.unexpected_eof("object")),
            }
        }
        self.depth -= 1;
        Ok(obj)
    }

    /// Array body; the opening `[` has been consumed, the closing `]` is consumed here.
    fn parse_array(&mut self) -> Result<JsonArray> {
        self.enter()?;
        let mut arr = JsonArray::new();
        loop {
            self.skip_whitespace()?;
            match self.peek()? {
                Some(',') => self.bump()?,
                Some(']') => {
                    self.bump()?;
                    break;
                }
                Some(_) => {
                    let value = self.parse_value()?;
                    arr.add(value);
                }
                None => return Err(self.unexpected_eof("array")),
            }
        }
        self.depth -= 1;
        Ok(arr)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.malformed(format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    /// Dispatches on the lookahead character. Leaves the reader positioned
    /// right after the value.
    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace()?;
        match self.peek()? {
            None => Err(self.unexpected_eof("value")),
            Some('{') => {
                self.bump()?;
                Ok(Value::Object(self.parse_object()?))
            }
            Some('[') => {
                self.bump()?;
                Ok(Value::Array(self.parse_array()?))
            }
            Some('"') => {
                self.bump()?;
                Ok(Value::String(self.parse_string()?))
            }
            Some('n' | 'N') => {
                self.parse_literal("null")?;
                Ok(Value::Null)
            }
            Some('t' | 'T') => {
                self.parse_literal("true")?;
                Ok(Value::Bool(true))
            }
            Some('f' | 'F') => {
                self.parse_literal("false")?;
                Ok(Value::Bool(false))
            }
            Some(_) => Ok(Value::Number(self.parse_number()?)),
        }
    }

    fn parse_literal(&mut self, expected: &str) -> Result<()> {
        let (line, column) = self.position();
        let token = self.scan_token()?;
        if token.eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(self.malformed_at(line, column, format!("invalid literal {token:?}")))
        }
    }

    fn parse_number(&mut self) -> Result<Number> {
        let (line, column) = self.position();
        let token = self.scan_token()?;
        if token.is_empty() {
            let message = match self.peek()? {
                Some(c) => format!("expected a value, found {c:?}"),
                None => "expected a value, found end of input".to_string(),
            };
            return Err(self.malformed_at(line, column, message));
        }
        parse_number_text(&token)
            .ok_or_else(|| self.malformed_at(line, column, format!("invalid number {token:?}")))
    }

    /// String body; the opening quote has been consumed, the closing one is consumed here.
    fn parse_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.next()? {
                None => return Err(self.unexpected_eof("string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.escape_mode {
                    EscapeMode::Standard => {
                        let c = self.parse_escape()?;
                        out.push(c);
                    }
                    EscapeMode::Verbatim => {
                        out.push('\\');
                        match self.next()? {
                            Some(c) => out.push(c),
                            None => return Err(self.unexpected_eof("string")),
                        }
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Decodes one escape sequence; the backslash has been consumed.
    fn parse_escape(&mut self) -> Result<char> {
        let c = match self.next()? {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.parse_unicode_escape(),
            Some(other) => return Err(self.malformed(format!("invalid escape '\\{other}'"))),
            None => return Err(self.unexpected_eof("string")),
        };
        Ok(c)
    }

    /// `\uXXXX`, joining a high surrogate with the `\uXXXX` low surrogate after it.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.read_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if self.next()? != Some('\\') || self.next()? != Some('u') {
                    return Err(self.malformed("unpaired high surrogate in \\u escape"));
                }
                let second = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.malformed("invalid low surrogate in \\u escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.malformed("unpaired low surrogate in \\u escape"));
            }
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| self.malformed("invalid \\u escape"))
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = match self.next()? {
                Some(c) => c.to_digit(16),
                None => return Err(self.unexpected_eof("string")),
            };
            match digit {
                Some(d) => code = code * 16 + d,
                None => return Err(self.malformed("expected four hex digits after \\u")),
            }
        }
        Ok(code)
    }

    /// Collects characters up to (not including) the next delimiter or end of input.
    fn scan_token(&mut self) -> Result<String> {
        let mut token = String::new();
        while let Some(c) = self.peek()? {
            if is_delimiter(c) {
                break;
            }
            token.push(c);
            self.bump()?;
        }
        Ok(token)
    }

    // ------------------------------------------------------------------
    // Character stream
    // ------------------------------------------------------------------

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.peek()? {
            if !c.is_whitespace() {
                break;
            }
            self.bump()?;
        }
        Ok(())
    }

    /// The next character, without consuming it.
    fn peek(&mut self) -> Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode_char()?;
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next character.
    fn next(&mut self) -> Result<Option<char>> {
        let c = match self.peeked.take() {
            Some(c) => Some(c),
            None => self.decode_char()?,
        };
        match c {
            Some('\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        Ok(c)
    }

    fn bump(&mut self) -> Result<()> {
        self.next().map(|_| ())
    }

    fn decode_char(&mut self) -> Result<Option<char>> {
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let width = match first {
            0x00..=0x7F => return Ok(Some(first as char)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(self.malformed("invalid UTF-8 in input")),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(b) => *slot = b,
                None => return Err(self.malformed("truncated UTF-8 sequence")),
            }
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.malformed("invalid UTF-8 in input"))
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.input.consume(1);
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(JsonError::Io(e)),
            }
        }
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    fn malformed(&self, message: impl Into<String>) -> JsonError {
        let (line, column) = self.position();
        self.malformed_at(line, column, message)
    }

    fn malformed_at(&self, line: usize, column: usize, message: impl Into<String>) -> JsonError {
        let message = message.into();
        debug!(line, column, %message, "malformed JSON");
        JsonError::Malformed {
            line,
            column,
            message,
        }
    }

    fn unexpected_eof(&self, context: &str) -> JsonError {
        self.malformed(format!("unexpected end of input while reading {context}"))
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ']' | '}') || c.is_whitespace()
}

fn root_mismatch(expected: &'static str, found: &Value) -> JsonError {
    JsonError::TypeMismatch {
        key: "$".to_string(),
        expected,
        found: found.kind(),
    }
}

/// Parses number text, applying the integral narrowing rule.
///
/// Accepts `-?digits(.digits)?([eE][+-]?digits)?`. Returns `None` for anything
/// else, including values too large for a finite double.
pub fn parse_number_text(text: &str) -> Option<Number> {
    if !is_number_shape(text) {
        return None;
    }
    let is_plain_integer = !text.contains(['.', 'e', 'E']);
    if is_plain_integer {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::from_integral(n));
        }
    }
    let d: f64 = text.parse().ok()?;
    if !d.is_finite() {
        return None;
    }
    if d.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&d) {
        return Some(Number::from_integral(d as i64));
    }
    Some(Number::Double(d))
}

fn is_number_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };
    if !digits(&mut i) {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        if !digits(&mut i) {
            return false;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}

/// Parses the first document in `text` with standard escaping.
///
/// Fails with [`JsonError::Malformed`] when `text` holds no object or array.
pub fn parse_str(text: &str) -> Result<Value> {
    parse_reader(text.as_bytes())
}

/// Parses the first document from `input` with standard escaping.
pub fn parse_reader<R: Read>(input: R) -> Result<Value> {
    let mut reader = JsonReader::new(input);
    match reader.read()? {
        Some(value) => Ok(value),
        None => Err(reader.malformed("no JSON object or array found")),
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}
