//! # docjson-core
//!
//! A self-contained JSON engine: a character-stream reader, a mutable
//! insertion-ordered document model, and a writer, tied together by a typed
//! accessor contract with default-valued getters.
//!
//! ## Quick start
//!
//! ```rust
//! use docjson_core::{JsonBuilder, TypedAccess};
//!
//! let builder = JsonBuilder::new();
//! let mut reader = builder.create_reader(r#"{"title":"Ocean data","year":2021}"#.as_bytes());
//! let mut record = reader.read_object().unwrap();
//!
//! assert_eq!(record.get_string("title").unwrap(), "Ocean data");
//! assert_eq!(record.get_int("year").unwrap(), 2021);
//! assert_eq!(record.get_string_or("publisher", "unknown"), "unknown");
//!
//! record.put("year", 2022);
//! record.put_not_null("version", None::<&str>);
//! assert_eq!(record.to_json_string(), r#"{"title":"Ocean data","year":2022}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` and `Number`
//! - [`object`] / [`array`] — the two ordered containers
//! - [`access`] — `TypedAccess`, the get/get-or-default contract
//! - [`reader`] — text → document
//! - [`writer`] — document → text
//! - [`builder`] — `JsonBuilder` factory
//! - [`config`] — escaping and layout options
//! - [`error`] — error types
//! - [`interop`] — serde / serde_json bridges

pub mod access;
pub mod array;
pub mod builder;
pub mod config;
pub mod error;
pub mod interop;
pub mod object;
pub mod reader;
pub mod value;
pub mod writer;

pub use access::TypedAccess;
pub use array::JsonArray;
pub use builder::JsonBuilder;
pub use config::{EscapeMode, JsonConfig};
pub use error::{JsonError, Result};
pub use object::JsonObject;
pub use reader::{parse_reader, parse_str, JsonReader};
pub use value::{Number, Value};
pub use writer::{JsonWriter, WriteJson};
