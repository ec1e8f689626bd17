//! Writers that turn a [`Config`] back into file contents.
//!
//! [`reconcile`] patches an existing file: it re-scans the original bytes,
//! rewrites the value of every dirty key it meets in place, appends dirty keys
//! the file does not have at the end of their section, and appends sections
//! the file does not have at the end of the file. Every other byte is copied
//! through unchanged.
//!
//! [`serialize`] ignores any existing layout and renders the whole
//! configuration; it is only used for files that do not exist yet.

use crate::config::Config;
use crate::parser::{IniParser, LineKind};
use crate::scanner::{Lines, ScannedLine};
use crate::types::LineEnding;
use tracing::trace;

/// Output of a reconciling pass
pub(crate) struct Reconciled {
    pub bytes: Vec<u8>,

    /// (section, key) positions of every value written by this pass
    pub flushed: Vec<(usize, usize)>,
}

struct Reconciler<'a> {
    config: &'a Config,
    original: &'a [u8],

    /// pending[section][key]: dirty and not yet written by this pass
    pending: Vec<Vec<bool>>,

    out: Vec<u8>,

    /// Decided the first time a new line has to be emitted
    line_ending: Option<LineEnding>,

    flushed: Vec<(usize, usize)>,
}

/// Patch `original` with the dirty values of `config`.
///
/// The region before the first header is treated as the body of section `""`.
pub(crate) fn reconcile(config: &Config, original: &[u8]) -> Reconciled {
    let mut writer = Reconciler::new(config, original);

    // Some(idx) only while inside a section that still has pending values
    let mut current = writer.dirty_section("");
    let mut tail = None;

    for line in Lines::new(original) {
        if line.middle.is_empty() && line.back.is_empty() {
            // whitespace after the last line; new keys go before it
            tail = Some(line);
            continue;
        }

        match IniParser::classify(line.middle) {
            LineKind::Section(name) => {
                if let Some(idx) = current {
                    writer.flush_section(idx);
                }
                current = writer.dirty_section(name);
                line.write_to(&mut writer.out);
            }
            LineKind::Pair {
                key, assign_end, ..
            } => match current {
                Some(idx) => writer.patch(idx, &line, key, assign_end),
                None => line.write_to(&mut writer.out),
            },
            LineKind::Blank | LineKind::Other => line.write_to(&mut writer.out),
        }
    }

    if let Some(idx) = current {
        writer.flush_section(idx);
    }
    if let Some(line) = tail {
        line.write_to(&mut writer.out);
    }
    writer.append_new_sections();

    Reconciled {
        bytes: writer.out,
        flushed: writer.flushed,
    }
}

impl<'a> Reconciler<'a> {
    fn new(config: &'a Config, original: &'a [u8]) -> Self {
        let pending: Vec<Vec<bool>> = config
            .sections()
            .map(|(_, section)| {
                section
                    .iter()
                    .map(|(_, value)| value.is_dirty())
                    .collect::<Vec<bool>>()
            })
            .collect();

        Self {
            config,
            original,
            pending,
            out: Vec::with_capacity(original.len() + 64),
            line_ending: None,
            flushed: Vec::new(),
        }
    }

    fn section_pending(&self, idx: usize) -> bool {
        self.pending
            .get(idx)
            .is_some_and(|keys| keys.iter().any(|&pending| pending))
    }

    /// The section named `name`, if it still has values to write
    fn dirty_section(&self, name: &str) -> Option<usize> {
        self.config
            .section_position(name)
            .filter(|&idx| self.section_pending(idx))
    }

    fn mark(&mut self, section_idx: usize, key_idx: usize) {
        self.pending[section_idx][key_idx] = false;
        self.flushed.push((section_idx, key_idx));
    }

    /// Re-emit a `key = value` line, replacing the value if it is pending
    fn patch(&mut self, section_idx: usize, line: &ScannedLine<'_>, key: &str, assign_end: usize) {
        let config = self.config;
        let entry = config.section_at(section_idx).and_then(|(name, section)| {
            let key_idx = section.position(key)?;
            let (_, value) = section.entry_at(key_idx)?;
            Some((name, key_idx, value))
        });

        let Some((name, key_idx, value)) = entry else {
            line.write_to(&mut self.out);
            return;
        };
        if !self.pending[section_idx][key_idx] {
            line.write_to(&mut self.out);
            return;
        }

        // keep the key and the '=' exactly as written, and the trailing comment
        self.out.extend_from_slice(line.front);
        self.out.extend_from_slice(&line.middle[..assign_end]);
        self.out.push(b' ');
        self.out.extend_from_slice(value.as_str().as_bytes());
        self.out.extend_from_slice(line.back);

        self.mark(section_idx, key_idx);
        trace!(section = name, key, "patched value in place");
    }

    /// Append every still-pending key of a section
    fn flush_section(&mut self, section_idx: usize) {
        let config = self.config;
        let Some((name, section)) = config.section_at(section_idx) else {
            return;
        };

        for (key_idx, (key, value)) in section.iter().enumerate() {
            if !self.pending[section_idx][key_idx] {
                continue;
            }
            let line_ending = self.line_ending();
            self.ensure_line_break(line_ending);
            self.out.extend_from_slice(key.as_bytes());
            self.out.extend_from_slice(b" = ");
            self.out.extend_from_slice(value.as_str().as_bytes());
            self.out.extend_from_slice(line_ending.as_bytes());

            self.mark(section_idx, key_idx);
            trace!(section = name, key, "appended key");
        }
    }

    /// Append sections the original never mentioned
    fn append_new_sections(&mut self) {
        let config = self.config;

        for section_idx in 0..self.pending.len() {
            if !self.section_pending(section_idx) {
                continue;
            }
            let Some((name, _)) = config.section_at(section_idx) else {
                continue;
            };

            let line_ending = self.line_ending();
            self.ensure_line_break(line_ending);
            self.out.push(b'[');
            self.out.extend_from_slice(name.as_bytes());
            self.out.push(b']');
            self.out.extend_from_slice(line_ending.as_bytes());
            trace!(section = name, "appended section");

            self.flush_section(section_idx);
        }
    }

    /// The convention for new lines: the end of what has been written so
    /// far, else the first terminator in the original, else the configured
    /// default.
    fn line_ending(&mut self) -> LineEnding {
        if let Some(line_ending) = self.line_ending {
            return line_ending;
        }

        let line_ending = LineEnding::from_tail(&self.out)
            .or_else(|| LineEnding::sniff(self.original))
            .unwrap_or(self.config.options().default_line_ending);
        self.line_ending = Some(line_ending);
        line_ending
    }

    /// Terminate a last line that has no line ending of its own
    fn ensure_line_break(&mut self, line_ending: LineEnding) {
        if !self.out.is_empty() && LineEnding::from_tail(&self.out).is_none() {
            self.out.extend_from_slice(line_ending.as_bytes());
        }
    }
}

/// Render the whole configuration, `""` section first and without a header
pub(crate) fn serialize(config: &Config) -> String {
    let line_ending = config.options().default_line_ending.as_str();
    let mut output = String::new();

    if let Some(global) = config.section("") {
        for (key, value) in global.iter() {
            output.push_str(&format!("{} = {}{}", key, value, line_ending));
        }
    }

    for (name, section) in config.sections() {
        if name.is_empty() {
            continue;
        }
        output.push_str(&format!("[{}]{}", name, line_ending));
        for (key, value) in section.iter() {
            output.push_str(&format!("{} = {}{}", key, value, line_ending));
        }
    }

    output
}
