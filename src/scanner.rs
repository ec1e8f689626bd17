//! Positional line scanner.
//!
//! Splits a byte buffer into logical lines, each made of three slices:
//!
//! - `front`  - leading whitespace, including any blank lines before the content
//! - `middle` - the meaningful text of the line
//! - `back`   - trailing whitespace, an optional `;`/`#` comment and the line terminator
//!
//! The split is purely positional: `front + middle + back` is always the exact
//! input, so a writer that re-emits the three parts reproduces the file byte
//! for byte.

/// One logical line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub front: &'a [u8],
    pub middle: &'a [u8],
    pub back: &'a [u8],
    /// Offset just past this line's terminator (or the end of the buffer)
    pub next: usize,
}

impl ScannedLine<'_> {
    /// Append the line, unchanged, to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.front);
        out.extend_from_slice(self.middle);
        out.extend_from_slice(self.back);
    }
}

fn is_comment(byte: u8) -> bool {
    byte == b';' || byte == b'#'
}

/// A `\n`, or a `\r` that is not the first half of `\r\n`.
fn is_terminator(data: &[u8], pos: usize) -> bool {
    match data[pos] {
        b'\n' => true,
        b'\r' => data.get(pos + 1) != Some(&b'\n'),
        _ => false,
    }
}

/// Scan the line starting at `start`.
///
/// Once a comment marker is seen the rest of the physical line is folded into
/// `back`, whatever it contains.
pub fn scan_line(data: &[u8], start: usize) -> ScannedLine<'_> {
    let mut pos = start.min(data.len());
    let begin = pos;

    while pos < data.len() && data[pos].is_ascii_whitespace() {
        pos += 1;
    }
    let front = &data[begin..pos];

    if pos >= data.len() {
        return ScannedLine {
            front,
            middle: &[],
            back: &[],
            next: pos,
        };
    }

    let content = pos;
    let mut cut: Option<usize> = None;
    let mut comment = false;

    while pos < data.len() && !is_terminator(data, pos) {
        let byte = data[pos];
        if byte.is_ascii_whitespace() {
            cut.get_or_insert(pos);
        } else if is_comment(byte) {
            cut.get_or_insert(pos);
            comment = true;
        } else if !comment {
            cut = None;
        }
        pos += 1;
    }

    let cut = cut.unwrap_or(pos);
    // include the terminator itself, if any
    let next = if pos < data.len() { pos + 1 } else { pos };

    ScannedLine {
        front,
        middle: &data[content..cut],
        back: &data[cut..next],
        next,
    }
}

/// Iterator over every logical line of a buffer
pub struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let line = scan_line(self.data, self.pos);
        self.pos = line.next;
        Some(line)
    }
}
