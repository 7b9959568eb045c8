//! Reader/writer configuration carried by [`JsonBuilder`](crate::JsonBuilder).

/// How string contents are treated on the way in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// RFC 8259 escapes are decoded when reading and produced when writing.
    #[default]
    Standard,
    /// Backslash sequences are kept raw when reading and strings are written
    /// unescaped. Byte-compatible with documents produced by older
    /// unescaping-free writers.
    Verbatim,
}

/// Settings shared by the readers and writers of one builder.
///
/// The default is standard escaping with compact output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonConfig {
    /// String handling for both reading and writing.
    pub escape_mode: EscapeMode,
    /// Spaces per nesting level; `None` writes compact text.
    pub indent: Option<usize>,
}

impl JsonConfig {
    /// Standard escaping, compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the string escape mode.
    pub fn with_escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Switches to indented output, `indent` spaces per level.
    pub fn pretty(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Switches back to single-line output.
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }
}
