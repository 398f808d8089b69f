use super::CommandResult;
use crate::document_model::chars::{non_whitespace_run, whitespace_run};
use crate::document_model::{Document, Edit};
use crate::selection::{Range, Selection};

/// Deletion primitives the host editor already has. The insert-mode kill
/// and char-delete commands only add a mode gate in front of these.
pub trait BufferPrimitives {
    fn delete_to_line_start(&self, doc: &Document, selection: &Selection) -> Vec<Edit>;
    fn delete_to_line_end(&self, doc: &Document, selection: &Selection) -> Vec<Edit>;
    fn delete_char_backward(&self, doc: &Document, selection: &Selection) -> Vec<Edit>;
    fn delete_char_forward(&self, doc: &Document, selection: &Selection) -> Vec<Edit>;
}

/// Usual editor semantics: a non-empty range deletes itself, a cursor
/// deletes towards its target. At a line edge the line break goes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardPrimitives;

impl BufferPrimitives for StandardPrimitives {
    fn delete_to_line_start(&self, doc: &Document, selection: &Selection) -> Vec<Edit> {
        delete_by(doc, selection, |head| {
            let line = doc.line_at(head);
            if head > line.from { line.from } else { head.saturating_sub(1) }
        })
    }

    fn delete_to_line_end(&self, doc: &Document, selection: &Selection) -> Vec<Edit> {
        delete_by(doc, selection, |head| {
            let line = doc.line_at(head);
            if head < line.to { line.to } else { (head + 1).min(doc.len()) }
        })
    }

    fn delete_char_backward(&self, doc: &Document, selection: &Selection) -> Vec<Edit> {
        delete_by(doc, selection, |head| head.saturating_sub(1))
    }

    fn delete_char_forward(&self, doc: &Document, selection: &Selection) -> Vec<Edit> {
        delete_by(doc, selection, |head| (head + 1).min(doc.len()))
    }
}

fn delete_by<F>(doc: &Document, selection: &Selection, target: F) -> Vec<Edit>
where
    F: Fn(usize) -> usize,
{
    let edits = selection
        .iter()
        .filter_map(|range| {
            if !range.is_empty() {
                return Some(Edit::delete(range.from(), range.to().min(doc.len())));
            }
            let to = target(range.head);
            (to != range.head).then(|| Edit::delete(range.head, to))
        })
        .collect();
    coalesce_deletions(edits)
}

/// Merge overlapping deletions so several cursors in one word still
/// produce a valid batch.
pub(crate) fn coalesce_deletions(mut edits: Vec<Edit>) -> Vec<Edit> {
    edits.sort_by_key(|edit| edit.from);

    let mut merged: Vec<Edit> = Vec::with_capacity(edits.len());
    for edit in edits {
        match merged.last_mut() {
            Some(prev) if edit.from < prev.to => {
                prev.to = prev.to.max(edit.to);
            }
            _ => merged.push(edit),
        }
    }
    merged
}

/// `Ctrl-w`: delete back to the start of the previous word on this line.
pub fn delete_word_backward(doc: &Document, selection: &Selection) -> CommandResult {
    let edits = selection
        .iter()
        .filter_map(|range| {
            let from = word_start_before(doc, range);
            (from < range.head).then(|| Edit::delete(from, range.head))
        })
        .collect();
    CommandResult::from_edits(coalesce_deletions(edits))
}

/// `Alt-d`: delete to the end of the next word. With no word left on the
/// line the deletion runs through the line break into the next line's
/// first word.
pub fn delete_word_forward(doc: &Document, selection: &Selection) -> CommandResult {
    let edits = selection
        .iter()
        .filter_map(|range| {
            let to = word_end_after(doc, range);
            (to > range.head).then(|| Edit::delete(range.head, to))
        })
        .collect();
    CommandResult::from_edits(coalesce_deletions(edits))
}

fn word_start_before(doc: &Document, range: &Range) -> usize {
    let line = doc.line_at(range.head);
    let before = doc.chars(line.from, range.head);

    let mut i = before.len();
    while i > 0 && before[i - 1].is_whitespace() {
        i -= 1;
    }
    while i > 0 && !before[i - 1].is_whitespace() {
        i -= 1;
    }
    line.from + i
}

fn word_end_after(doc: &Document, range: &Range) -> usize {
    let line = doc.line_at(range.head);
    let rest = doc.chars(range.head, line.to);

    let leading = whitespace_run(rest);
    let word = non_whitespace_run(&rest[leading..]);
    if word > 0 {
        return range.head + leading + word;
    }

    match doc.line(line.number + 1) {
        Some(next) => {
            let text = doc.line_text(&next);
            let leading = whitespace_run(text);
            next.from + leading + non_whitespace_run(&text[leading..])
        }
        None => range.head + leading,
    }
}

pub fn kill_to_line_start(
    primitives: &dyn BufferPrimitives,
    doc: &Document,
    selection: &Selection,
) -> CommandResult {
    CommandResult::from_edits(primitives.delete_to_line_start(doc, selection))
}

pub fn kill_to_line_end(
    primitives: &dyn BufferPrimitives,
    doc: &Document,
    selection: &Selection,
) -> CommandResult {
    CommandResult::from_edits(primitives.delete_to_line_end(doc, selection))
}

pub fn delete_char_backward(
    primitives: &dyn BufferPrimitives,
    doc: &Document,
    selection: &Selection,
) -> CommandResult {
    CommandResult::from_edits(primitives.delete_char_backward(doc, selection))
}

pub fn delete_char_forward(
    primitives: &dyn BufferPrimitives,
    doc: &Document,
    selection: &Selection,
) -> CommandResult {
    CommandResult::from_edits(primitives.delete_char_forward(doc, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edits(result: CommandResult) -> Vec<Edit> {
        match result {
            CommandResult::Edit { edits, selection } => {
                assert!(selection.is_none());
                edits
            }
            other => panic!("expected edits, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_word_backward() {
        let doc = Document::from_string("foo bar  ");
        assert_eq!(
            edits(delete_word_backward(&doc, &Selection::point(9))),
            vec![Edit::delete(4, 9)]
        );
        assert_eq!(
            edits(delete_word_backward(&doc, &Selection::point(6))),
            vec![Edit::delete(4, 6)]
        );
    }

    #[test]
    fn test_delete_word_backward_stays_on_line() {
        let doc = Document::from_string("foo\nbar");
        assert_eq!(delete_word_backward(&doc, &Selection::point(4)), CommandResult::NoOp);
        assert_eq!(
            edits(delete_word_backward(&doc, &Selection::point(6))),
            vec![Edit::delete(4, 6)]
        );
    }

    #[test]
    fn test_delete_word_forward() {
        let doc = Document::from_string("foo  bar baz");
        assert_eq!(
            edits(delete_word_forward(&doc, &Selection::point(3))),
            vec![Edit::delete(3, 8)]
        );
    }

    #[test]
    fn test_delete_word_forward_crosses_line_break() {
        let doc = Document::from_string("foo  \n  bar baz");
        assert_eq!(
            edits(delete_word_forward(&doc, &Selection::point(3))),
            vec![Edit::delete(3, 11)]
        );
    }

    #[test]
    fn test_delete_word_forward_at_document_end() {
        let doc = Document::from_string("foo");
        assert_eq!(delete_word_forward(&doc, &Selection::point(3)), CommandResult::NoOp);
    }

    #[test]
    fn test_overlapping_deletions_are_merged() {
        let doc = Document::from_string("hello world");
        let selection = Selection::new(vec![Range::cursor(9), Range::cursor(11)], 0).unwrap();
        assert_eq!(
            edits(delete_word_backward(&doc, &selection)),
            vec![Edit::delete(6, 11)]
        );
    }

    #[test]
    fn test_standard_primitives() {
        let doc = Document::from_string("abc\ndef");
        let primitives = StandardPrimitives;

        assert_eq!(
            primitives.delete_to_line_start(&doc, &Selection::point(6)),
            vec![Edit::delete(4, 6)]
        );
        // At a line start the line break before it goes
        assert_eq!(
            primitives.delete_to_line_start(&doc, &Selection::point(4)),
            vec![Edit::delete(3, 4)]
        );
        assert_eq!(
            primitives.delete_to_line_end(&doc, &Selection::point(1)),
            vec![Edit::delete(1, 3)]
        );
        assert_eq!(
            primitives.delete_to_line_end(&doc, &Selection::point(3)),
            vec![Edit::delete(3, 4)]
        );
        assert_eq!(
            primitives.delete_char_backward(&doc, &Selection::point(0)),
            vec![]
        );
        assert_eq!(
            primitives.delete_char_forward(&doc, &Selection::point(7)),
            vec![]
        );
        assert_eq!(
            primitives.delete_char_forward(&doc, &Range::new(5, 1).into()),
            vec![Edit::delete(1, 5)]
        );
    }

    #[test]
    fn test_gated_wrappers_forward_to_primitives() {
        let doc = Document::from_string("abc");
        let result = kill_to_line_end(&StandardPrimitives, &doc, &Selection::point(0));
        assert_eq!(edits(result), vec![Edit::delete(0, 3)]);
        let result = delete_char_backward(&StandardPrimitives, &doc, &Selection::point(0));
        assert_eq!(result, CommandResult::NoOp);
    }
}
