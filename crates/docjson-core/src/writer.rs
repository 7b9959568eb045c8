//! JSON text writer.
//!
//! Renders a [`Value`] tree as compact text (the default) or indented text
//! when [`JsonConfig::indent`] is set. Empty containers always render as
//! `{}` / `[]`. Doubles that JSON cannot carry (NaN, ±infinity) are written
//! as `null`.
//!
//! With [`EscapeMode::Standard`] strings are escaped per RFC 8259 (`"`, `\`
//! and control characters). [`EscapeMode::Verbatim`] writes string contents
//! untouched, for byte-compatibility with documents read in verbatim mode.
//!
//! # Example
//! ```
//! use docjson_core::{JsonConfig, JsonObject, JsonWriter};
//!
//! let mut obj = JsonObject::new();
//! obj.put("title", "Data \"set\"");
//! obj.put("year", 2024);
//! assert_eq!(obj.to_json_string(), r#"{"title":"Data \"set\"","year":2024}"#);
//!
//! let pretty = JsonWriter::new(JsonConfig::new().pretty(2)).to_string(&obj);
//! assert_eq!(pretty, "{\n  \"title\": \"Data \\\"set\\\"\",\n  \"year\": 2024\n}");
//! ```

use std::io;

use tracing::debug;

use crate::array::JsonArray;
use crate::config::{EscapeMode, JsonConfig};
use crate::error::Result;
use crate::object::JsonObject;
use crate::value::{Number, Value};

/// Anything the writer can render: a [`Value`] or one of the two containers.
pub trait WriteJson {
    /// Appends the JSON text of `self` to `out`, nested `depth` levels deep.
    fn write_json(&self, writer: &JsonWriter, depth: usize, out: &mut String);
}

impl WriteJson for Value {
    fn write_json(&self, writer: &JsonWriter, depth: usize, out: &mut String) {
        writer.write_value(self, depth, out);
    }
}

impl WriteJson for JsonObject {
    fn write_json(&self, writer: &JsonWriter, depth: usize, out: &mut String) {
        writer.write_object(self, depth, out);
    }
}

impl WriteJson for JsonArray {
    fn write_json(&self, writer: &JsonWriter, depth: usize, out: &mut String) {
        writer.write_array(self, depth, out);
    }
}

/// Serializes values to JSON text.
///
/// A writer holds only its [`JsonConfig`], so one instance can render any
/// number of documents.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    config: JsonConfig,
}

impl JsonWriter {
    /// A writer using `config` for escaping and indentation.
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonConfig {
        &self.config
    }

    /// Renders `value` to a new string.
    pub fn to_string<T: WriteJson + ?Sized>(&self, value: &T) -> String {
        let mut out = String::new();
        value.write_json(self, 0, &mut out);
        out
    }

    /// Renders `value` into `sink`.
    pub fn write_to<T, W>(&self, value: &T, mut sink: W) -> Result<()>
    where
        T: WriteJson + ?Sized,
        W: io::Write,
    {
        sink.write_all(self.to_string(value).as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn write_value(&self, value: &Value, depth: usize, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Number(n) => write_number(n, out),
            Value::String(s) => self.write_string(s, out),
            Value::Array(arr) => self.write_array(arr, depth, out),
            Value::Object(obj) => self.write_object(obj, depth, out),
        }
    }

    fn write_object(&self, obj: &JsonObject, depth: usize, out: &mut String) {
        if obj.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push('{');
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(depth + 1, out);
            self.write_string(key, out);
            out.push(':');
            if self.config.indent.is_some() {
                out.push(' ');
            }
            self.write_value(value, depth + 1, out);
        }
        self.newline(depth, out);
        out.push('}');
    }

    fn write_array(&self, arr: &JsonArray, depth: usize, out: &mut String) {
        if arr.is_empty() {
            out.push_str("[]");
            return;
        }
        out.push('[');
        for (i, value) in arr.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(depth + 1, out);
            self.write_value(value, depth + 1, out);
        }
        self.newline(depth, out);
        out.push(']');
    }

    /// Quoted string; keys go through here as well.
    fn write_string(&self, s: &str, out: &mut String) {
        out.push('"');
        match self.config.escape_mode {
            EscapeMode::Standard => escape_into(s, out),
            EscapeMode::Verbatim => out.push_str(s),
        }
        out.push('"');
    }

    /// Line break plus indentation in pretty mode; nothing when compact.
    fn newline(&self, depth: usize, out: &mut String) {
        if let Some(width) = self.config.indent {
            out.push('\n');
            out.extend(std::iter::repeat_n(' ', width * depth));
        }
    }
}

/// Writes a number in its shortest round-trip form. NaN and the infinities
/// have no JSON spelling and become `null`.
fn write_number(n: &Number, out: &mut String) {
    if n.is_finite() {
        out.push_str(&n.to_string());
    } else {
        debug!(number = %n, "non-finite number written as null");
        out.push_str("null");
    }
}

/// Escapes `"`, `\` and the C0 control characters. Everything else,
/// including non-ASCII, is written as-is.
fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}
