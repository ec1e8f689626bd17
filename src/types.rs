use crate::error::{ConfigError, ParseResult};
use std::collections::HashMap;
use std::fmt;

/// Trim the ASCII space/tab padding allowed around section and key names
pub(crate) fn trim_name(name: &str) -> &str {
    name.trim_matches(|c| c == ' ' || c == '\t')
}

/// A stored value: its text plus whether the caller changed it since the last write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    text: String,
    dirty: bool,
}

impl Value {
    /// A value as read from a file
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dirty: false,
        }
    }

    /// A value assigned by the caller, pending a write
    pub(crate) fn assigned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dirty: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether this value still has to be written out
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replace the text with a loaded value, leaving the flag alone
    pub(crate) fn load(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Parse a boolean value (true/false/on/off/yes/no/1/0)
    pub fn parse_bool(s: &str) -> ParseResult<bool> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            _ => Err(ConfigError::type_error("value", "bool", s)),
        }
    }

    /// Parse an integer (decimal or 0x hex)
    pub fn parse_int(s: &str) -> ParseResult<i64> {
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16),
            None => s.parse::<i64>(),
        };
        parsed.map_err(|_| ConfigError::type_error("value", "integer", s))
    }

    /// Parse a float
    pub fn parse_float(s: &str) -> ParseResult<f64> {
        s.parse::<f64>()
            .map_err(|_| ConfigError::type_error("value", "float", s))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A named group of keys. Keys keep the order they were first seen in.
#[derive(Debug, Clone, Default)]
pub struct Section {
    entries: Vec<(String, Value)>,

    /// Key -> position in `entries`
    index: HashMap<String, usize>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key without creating it
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(trim_name(key))
    }

    /// Position of a key in insertion order
    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.index.get(trim_name(key)).copied()
    }

    /// Position of `key`, inserting an empty clean value if it is missing
    pub(crate) fn get_or_create(&mut self, key: &str) -> usize {
        let key = trim_name(key);
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push((key.to_string(), Value::default()));
        self.index.insert(key.to_string(), idx);
        idx
    }

    /// Insert or overwrite a value
    pub(crate) fn assign(&mut self, key: &str, value: Value) {
        let idx = self.get_or_create(key);
        self.entries[idx].1 = value;
    }

    pub(crate) fn entry_at(&self, idx: usize) -> Option<(&str, &Value)> {
        self.entries.get(idx).map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn value_at_mut(&mut self, idx: usize) -> Option<&mut Value> {
        self.entries.get_mut(idx).map(|(_, value)| value)
    }

    /// Iterate over keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A section is dirty when any of its values is
    pub fn is_dirty(&self) -> bool {
        self.entries.iter().any(|(_, value)| value.is_dirty())
    }
}

/// Line terminator convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The platform's usual convention
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
            LineEnding::CrLf => b"\r\n",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Detect the convention from the last one or two bytes of `buf`.
    ///
    /// Returns `None` for an empty buffer or one that does not end in a
    /// terminator.
    pub fn from_tail(buf: &[u8]) -> Option<Self> {
        match buf {
            [.., b'\r', b'\n'] => Some(LineEnding::CrLf),
            [.., b'\n'] => Some(LineEnding::Lf),
            [.., b'\r'] => Some(LineEnding::Cr),
            _ => None,
        }
    }

    /// Detect the convention from the first terminator anywhere in `buf`
    pub fn sniff(buf: &[u8]) -> Option<Self> {
        let pos = buf.iter().position(|&b| b == b'\n' || b == b'\r')?;
        match (buf[pos], buf.get(pos + 1)) {
            (b'\r', Some(b'\n')) => Some(LineEnding::CrLf),
            (b'\r', _) => Some(LineEnding::Cr),
            _ => Some(LineEnding::Lf),
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::CrLf => "CRLF",
        };
        write!(f, "{}", name)
    }
}
