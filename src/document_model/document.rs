use super::chars::{CharCategory, categorize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEnding {
    Unix,    // \n (LF)
    Windows, // \r\n (CRLF)
    Mac,     // \r (CR)
}

impl LineEnding {
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::Windows
        } else if content.contains('\r') {
            LineEnding::Mac
        } else {
            LineEnding::Unix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Mac => "\r",
        }
    }
}

/// One line of a document. `from`/`to` are absolute char offsets, `to`
/// excludes the line terminator. `number` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub from: usize,
    pub to: usize,
}

impl Line {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

struct LineIndex {
    line_starts: Vec<usize>, // Char offsets where each line starts
}

impl LineIndex {
    fn build(chars: &[char]) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in chars.iter().enumerate() {
            if *ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    // Zero-based index of the line containing `offset`
    fn line_index_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        }
    }
}

/// Immutable, line-indexed snapshot of the buffer text.
///
/// Offsets are absolute char positions. Line terminators are folded to
/// `\n` on load; the detected convention is kept so the text can be
/// written back the way it came in.
pub struct Document {
    chars: Vec<char>,
    line_index: LineIndex,
    line_ending: LineEnding,
}

impl Document {
    pub fn new() -> Self {
        Self::from_string(String::new())
    }

    pub fn from_string(content: impl Into<String>) -> Self {
        let content = content.into();
        let line_ending = LineEnding::detect(&content);
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let mut document = Self::from_chars(normalized.chars().collect());
        document.line_ending = line_ending;
        document
    }

    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_string(content))
    }

    pub(crate) fn from_chars(chars: Vec<char>) -> Self {
        let line_index = LineIndex::build(&chars);
        Self {
            chars,
            line_index,
            line_ending: LineEnding::Unix,
        }
    }

    pub(crate) fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Total length in chars.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// The separator the engine inserts between lines.
    pub fn line_break(&self) -> &'static str {
        "\n"
    }

    /// Line by 1-indexed number.
    pub fn line(&self, number: usize) -> Option<Line> {
        if number == 0 || number > self.line_count() {
            return None;
        }
        Some(self.line_by_index(number - 1))
    }

    /// Line containing `offset`, clamped to the document.
    pub fn line_at(&self, offset: usize) -> Line {
        let offset = offset.min(self.len());
        self.line_by_index(self.line_index.line_index_of(offset))
    }

    fn line_by_index(&self, idx: usize) -> Line {
        let from = self.line_index.line_starts[idx];
        let to = match self.line_index.line_starts.get(idx + 1) {
            Some(next_start) => next_start - 1,
            None => self.len(),
        };
        Line {
            number: idx + 1,
            from,
            to,
        }
    }

    /// Chars between two offsets. Bounds are clamped and ordered.
    pub fn chars(&self, from: usize, to: usize) -> &[char] {
        let (from, to) = self.clamp_span(from, to);
        &self.chars[from..to]
    }

    pub fn slice(&self, from: usize, to: usize) -> String {
        self.chars(from, to).iter().collect()
    }

    pub fn line_text(&self, line: &Line) -> &[char] {
        self.chars(line.from, line.to)
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Bounds of the word touching `pos`, looking at the chars on both
    /// sides. Returns `None` when neither neighbour is a word char.
    pub fn word_at(&self, pos: usize) -> Option<(usize, usize)> {
        let pos = pos.min(self.len());
        let line = self.line_at(pos);
        let mut start = pos;
        let mut end = pos;

        while start > line.from && categorize(self.chars[start - 1]) == CharCategory::Word {
            start -= 1;
        }
        while end < line.to && categorize(self.chars[end]) == CharCategory::Word {
            end += 1;
        }

        if start == end { None } else { Some((start, end)) }
    }

    /// Normalized text (`\n` line breaks).
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text with the line ending the document was loaded with.
    pub fn text_with_line_ending(&self) -> String {
        let text = self.text();
        match self.line_ending {
            LineEnding::Unix => text,
            other => text.replace('\n', other.as_str()),
        }
    }

    fn clamp_span(&self, from: usize, to: usize) -> (usize, usize) {
        let len = self.len();
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        (from.min(len), to.min(len))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self::from_chars(self.chars.clone()).with_line_ending(self.line_ending)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("lines", &self.line_count())
            .field("line_ending", &self.line_ending)
            .finish()
    }
}
