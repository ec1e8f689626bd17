use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ini.pest"]
pub struct IniParser;

/// What a scanned line means to the loader and the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Whitespace or comment only
    Blank,

    /// Section header: [name]
    Section(&'a str),

    /// Assignment: key = value
    Pair {
        key: &'a str,
        value: &'a str,
        /// Offset in the line just past the '='
        assign_end: usize,
    },

    /// Anything else (no '=', not valid UTF-8); ignored
    Other,
}

impl IniParser {
    /// Classify the `middle` slice of a scanned line
    pub fn classify(middle: &[u8]) -> LineKind<'_> {
        if middle.is_empty() {
            return LineKind::Blank;
        }

        let Ok(text) = std::str::from_utf8(middle) else {
            return LineKind::Other;
        };

        let Ok(mut pairs) = IniParser::parse(Rule::line, text) else {
            return LineKind::Other;
        };

        let Some(line) = pairs.next() else {
            return LineKind::Other;
        };

        for inner in line.into_inner() {
            match inner.as_rule() {
                Rule::header => return Self::section(inner),
                Rule::pair => return Self::pair(inner),
                _ => {}
            }
        }

        LineKind::Other
    }

    fn section(pair: Pair<'_, Rule>) -> LineKind<'_> {
        pair.into_inner()
            .find(|p| p.as_rule() == Rule::section_name)
            .map(|p| LineKind::Section(p.as_str()))
            .unwrap_or(LineKind::Other)
    }

    fn pair(pair: Pair<'_, Rule>) -> LineKind<'_> {
        let mut key = None;
        let mut value = "";
        let mut assign_end = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::key => key = Some(inner.as_str()),
                Rule::separator => assign_end = Some(inner.as_span().end()),
                Rule::value => value = inner.as_str(),
                _ => {}
            }
        }

        match (key, assign_end) {
            (Some(key), Some(assign_end)) => LineKind::Pair {
                key,
                value,
                assign_end,
            },
            _ => LineKind::Other,
        }
    }
}
