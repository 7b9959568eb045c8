//! Factory for documents, readers and writers.
//!
//! `JsonBuilder` is an ordinary value: create one per configuration you need.
//! Every reader and writer it hands out shares the builder's [`JsonConfig`].

use std::io::Read;

use tracing::trace;

use crate::array::JsonArray;
use crate::config::JsonConfig;
use crate::object::JsonObject;
use crate::reader::JsonReader;
use crate::value::Value;
use crate::writer::JsonWriter;

/// Hands out containers, readers and writers for one [`JsonConfig`].
#[derive(Debug, Clone, Default)]
pub struct JsonBuilder {
    config: JsonConfig,
}

impl JsonBuilder {
    /// A builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose readers and writers use `config`.
    pub fn with_config(config: JsonConfig) -> Self {
        trace!(?config, "created JSON builder");
        Self { config }
    }

    pub fn config(&self) -> &JsonConfig {
        &self.config
    }

    /// An empty object.
    pub fn create_object(&self) -> JsonObject {
        JsonObject::new()
    }

    pub fn create_array(&self) -> JsonArray {
        JsonArray::new()
    }

    /// A reader over `input` using the builder's escape mode.
    pub fn create_reader<R: Read>(&self, input: R) -> JsonReader<R> {
        JsonReader::with_config(input, &self.config)
    }

    /// A writer with the builder's escape mode and indentation.
    pub fn create_writer(&self) -> JsonWriter {
        JsonWriter::new(self.config.clone())
    }

    /// An array holding `items` in order.
    pub fn create_array_from_objects<I>(&self, items: I) -> JsonArray
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        items.into_iter().collect()
    }

    /// Flattens `lists` into one array without duplicates.
    ///
    /// The lists are visited last to first, each from front to back, and a
    /// value is kept only the first time it is seen. `[[1, 2], [2, 3]]`
    /// therefore yields `[2, 3, 1]`.
    pub fn create_array_from_lists<L, I>(&self, lists: L) -> JsonArray
    where
        L: IntoIterator<Item = I>,
        L::IntoIter: DoubleEndedIterator,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut arr = JsonArray::new();
        for list in lists.into_iter().rev() {
            for item in list {
                let value = item.into();
                if !arr.contains(&value) {
                    arr.add(value);
                }
            }
        }
        arr
    }
}
