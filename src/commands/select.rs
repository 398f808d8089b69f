use super::CommandResult;
use crate::document_model::Document;
use crate::selection::{Range, Selection};
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// `Alt-s`: one range per line of every selected range. Empty lines in
/// the middle of a range are kept; the empty tail after a final newline
/// is not.
pub fn split_selection_on_newline(doc: &Document, selection: &Selection) -> CommandResult {
    let mut ranges = Vec::new();

    for range in selection.iter() {
        let text = doc.chars(range.from(), range.to());
        let segments: Vec<&[char]> = text.split(|c| *c == '\n').collect();
        let last = segments.len() - 1;

        let mut pos = range.from();
        for (i, segment) in segments.iter().enumerate() {
            if !segment.is_empty() || i < last {
                ranges.push(Range::new(pos, pos + segment.len()));
            }
            pos += segment.len() + 1;
        }
    }

    CommandResult::from_ranges(ranges, 0)
}

/// `S`: one range per whitespace-separated token of every selected range.
/// Stand-in for splitting on a user supplied pattern.
pub fn split_selection(doc: &Document, selection: &Selection) -> CommandResult {
    let mut ranges = Vec::new();

    for range in selection.iter() {
        let text = doc.slice(range.from(), range.to());
        // Byte offset into `text`; each token is searched after the last one
        let mut search_from = 0;

        for token in whitespace_pattern().split(&text).filter(|t| !t.is_empty()) {
            let Some(found) = text[search_from..].find(token) else {
                continue;
            };
            let start_byte = search_from + found;
            let start = range.from() + text[..start_byte].chars().count();
            ranges.push(Range::new(start, start + token.chars().count()));
            search_from = start_byte + token.len();
        }
    }

    CommandResult::from_ranges(ranges, 0)
}

/// `X`: grow every range to whole lines. Overlaps are left for the host
/// to merge.
pub fn extend_to_line_bounds(doc: &Document, selection: &Selection) -> CommandResult {
    CommandResult::Selection(selection.transform(|range| {
        let start = doc.line_at(range.from());
        let end = doc.line_at(range.to());
        Range::new(start.from, end.to)
    }))
}

/// `s`: select the word under the main cursor.
pub fn select_word(doc: &Document, selection: &Selection) -> CommandResult {
    match doc.word_at(selection.main().head) {
        Some((from, to)) => CommandResult::Selection(Selection::single(Range::new(from, to))),
        None => CommandResult::NoOp,
    }
}
