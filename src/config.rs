use crate::error::{ConfigError, ParseResult};
use crate::parser::{IniParser, LineKind};
use crate::reconcile::{self, Reconciled};
use crate::scanner::Lines;
use crate::types::{LineEnding, Section, Value, trim_name};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// An INI configuration: sections of keys, each value remembering whether it
/// was changed since it was last written.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sections in the order they were first seen or set
    sections: Vec<(String, Section)>,

    /// Section name -> position in `sections`
    index: HashMap<String, usize>,

    /// Configuration options
    options: ConfigOptions,
}

/// Configuration options
#[derive(Debug, Clone)]
pub struct ConfigOptions {
    /// Line ending used when nothing in the file says otherwise: new files,
    /// and appends to a file that has no line terminator yet
    pub default_line_ending: LineEnding,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            default_line_ending: LineEnding::native(),
        }
    }
}

impl Config {
    /// Create a new, empty configuration with default options
    pub fn new() -> Self {
        Self::with_options(ConfigOptions::default())
    }

    /// Create a new, empty configuration with custom options
    pub fn with_options(options: ConfigOptions) -> Self {
        Self {
            sections: Vec::new(),
            index: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Read a configuration file into a new `Config`
    pub fn load(path: impl AsRef<Path>) -> ParseResult<Self> {
        let mut config = Self::new();
        config.parse_file(path)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing or unreadable file gives an empty
    /// configuration instead of an error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "using empty configuration");
                Self::new()
            }
        }
    }

    /// Merge a configuration file into this one.
    ///
    /// On error the configuration is left untouched.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| ConfigError::from_io(path, e))?;
        debug!(path = %path.display(), bytes = data.len(), "loading configuration");
        self.parse(&data);
        Ok(())
    }

    /// Merge configuration text into this one.
    ///
    /// The first occurrence of a key in `data` wins, and values already set by
    /// the caller (dirty) are never overwritten. Loaded values are clean. Keys
    /// before the first header belong to the section named `""`. Lines that
    /// are neither headers nor `key = value` are skipped.
    pub fn parse(&mut self, data: &[u8]) {
        let mut current = String::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for line in Lines::new(data) {
            match IniParser::classify(line.middle) {
                LineKind::Section(name) => {
                    current.clear();
                    current.push_str(name);
                }
                LineKind::Pair { key, value, .. } => {
                    let section_idx = self.get_or_create_section(&current);
                    let section = &mut self.sections[section_idx].1;
                    let key_idx = section.get_or_create(key);

                    if !seen.insert((section_idx, key_idx)) {
                        continue;
                    }
                    if let Some(entry) = section.value_at_mut(key_idx) {
                        if !entry.is_dirty() {
                            entry.load(value);
                        }
                    }
                }
                LineKind::Blank | LineKind::Other => {}
            }
        }
    }

    /// Position of a section, creating it empty if it is missing
    pub(crate) fn get_or_create_section(&mut self, name: &str) -> usize {
        let name = trim_name(name);
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.sections.len();
        self.sections.push((name.to_string(), Section::new()));
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub(crate) fn section_position(&self, name: &str) -> Option<usize> {
        self.index.get(trim_name(name)).copied()
    }

    pub(crate) fn section_at(&self, idx: usize) -> Option<(&str, &Section)> {
        self.sections
            .get(idx)
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Look up a section without creating it
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.section_position(name)
            .map(|idx| &self.sections[idx].1)
    }

    /// Iterate over sections in insertion order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Look up a value without creating anything
    pub fn try_get(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section)?.get(key)
    }

    /// Check if a key exists
    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.try_get(section, key).is_some()
    }

    /// The stored text, or an empty string if the key is missing
    pub fn get_string(&self, section: &str, key: &str) -> String {
        self.try_get(section, key)
            .map(|value| value.as_str().to_string())
            .unwrap_or_default()
    }

    /// Parse the stored text as `T`.
    ///
    /// Returns `Ok(None)` when the key is missing and a `TypeError` when the
    /// text does not parse.
    pub fn try_get_as<T: FromStr>(&self, section: &str, key: &str) -> ParseResult<Option<T>> {
        let Some(value) = self.try_get(section, key) else {
            return Ok(None);
        };
        value.as_str().parse::<T>().map(Some).map_err(|_| {
            ConfigError::type_error(
                format!("{}:{}", section, key),
                std::any::type_name::<T>(),
                value.as_str(),
            )
        })
    }

    /// Parse the stored text as `T`, falling back to `default`
    pub fn get_or<T: FromStr>(&self, section: &str, key: &str, default: T) -> T {
        self.try_get_as(section, key).ok().flatten().unwrap_or(default)
    }

    /// Parse the stored text as `T`, falling back to `T::default()`
    pub fn get_as<T: FromStr + Default>(&self, section: &str, key: &str) -> T {
        self.get_or(section, key, T::default())
    }

    /// Integer value (decimal or 0x hex), 0 if missing or invalid
    pub fn get_int(&self, section: &str, key: &str) -> i64 {
        self.try_get(section, key)
            .and_then(|value| Value::parse_int(value.as_str()).ok())
            .unwrap_or_default()
    }

    /// Float value, 0.0 if missing or invalid
    pub fn get_float(&self, section: &str, key: &str) -> f64 {
        self.try_get(section, key)
            .and_then(|value| Value::parse_float(value.as_str()).ok())
            .unwrap_or_default()
    }

    /// Boolean value (true/false/on/off/yes/no/1/0), false if missing or invalid
    pub fn get_bool(&self, section: &str, key: &str) -> bool {
        self.try_get(section, key)
            .and_then(|value| Value::parse_bool(value.as_str()).ok())
            .unwrap_or_default()
    }

    /// Set a value. It is written out by the next save.
    pub fn set(&mut self, section: &str, key: &str, value: impl Display) {
        let idx = self.get_or_create_section(section);
        self.sections[idx]
            .1
            .assign(key, Value::assigned(value.to_string()));
    }

    /// Whether any value still has to be written out
    pub fn is_dirty(&self) -> bool {
        self.sections.iter().any(|(_, section)| section.is_dirty())
    }

    /// Patch `original` with the pending changes, without clearing them
    pub fn reconcile(&self, original: &[u8]) -> Vec<u8> {
        reconcile::reconcile(self, original).bytes
    }

    /// Patch `original` with the pending changes and mark them written
    pub fn render(&mut self, original: &[u8]) -> Vec<u8> {
        let Reconciled { bytes, flushed } = reconcile::reconcile(self, original);
        self.mark_flushed(&flushed);
        bytes
    }

    /// Render the whole configuration from scratch, ignoring any file layout
    pub fn serialize(&self) -> String {
        reconcile::serialize(self)
    }

    /// Write pending changes to `path`.
    ///
    /// An existing file is patched in place so everything that was not
    /// changed stays byte-identical. A missing file is created from
    /// [`Config::serialize`]. Flags are cleared only after the write succeeds.
    pub fn save(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();

        let original = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let output = self.serialize();
                debug!(path = %path.display(), bytes = output.len(), "writing new configuration");
                std::fs::write(path, output)
                    .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
                self.mark_all_clean();
                return Ok(());
            }
            Err(e) => return Err(ConfigError::from_io(path, e)),
        };

        let Reconciled { bytes, flushed } = reconcile::reconcile(self, &original);
        if bytes == original {
            debug!(path = %path.display(), "configuration unchanged");
        } else {
            debug!(
                path = %path.display(),
                bytes = bytes.len(),
                values = flushed.len(),
                "patching configuration"
            );
            std::fs::write(path, &bytes)
                .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        }
        self.mark_flushed(&flushed);
        Ok(())
    }

    fn mark_flushed(&mut self, flushed: &[(usize, usize)]) {
        for &(section_idx, key_idx) in flushed {
            if let Some(value) = self
                .sections
                .get_mut(section_idx)
                .and_then(|(_, section)| section.value_at_mut(key_idx))
            {
                value.mark_clean();
            }
        }
    }

    fn mark_all_clean(&mut self) {
        for (_, section) in &mut self.sections {
            for idx in 0..section.len() {
                if let Some(value) = section.value_at_mut(idx) {
                    value.mark_clean();
                }
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
