use super::CommandResult;
use crate::document_model::Document;
use crate::selection::Selection;

/// `G`: cursor at the start of `line` (1-indexed), or of the last line.
/// Out-of-range targets leave everything as it was.
pub fn goto_line(doc: &Document, line: Option<usize>) -> CommandResult {
    let target = line.unwrap_or(doc.line_count());
    match doc.line(target) {
        Some(line) => CommandResult::Selection(Selection::point(line.from)),
        None => CommandResult::NoOp,
    }
}
