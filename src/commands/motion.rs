use super::CommandResult;
use crate::document_model::Document;
use crate::document_model::chars::{is_blank, non_whitespace_run, whitespace_run};
use crate::selection::{Range, Selection};

// Word motions. Every range moves on its own and collapses to a cursor;
// range order and the main index are untouched.

/// `e`: end of the next word.
pub fn move_next_word_end(doc: &Document, selection: &Selection) -> CommandResult {
    CommandResult::Selection(
        selection.transform(|range| Range::cursor(word_end_after(doc, range.head))),
    )
}

/// `W`: start of the next WORD.
pub fn move_next_long_word_start(doc: &Document, selection: &Selection) -> CommandResult {
    CommandResult::Selection(
        selection.transform(|range| Range::cursor(long_word_start_after(doc, range.head))),
    )
}

/// `B`: start of the previous WORD.
pub fn move_prev_long_word_start(doc: &Document, selection: &Selection) -> CommandResult {
    CommandResult::Selection(
        selection.transform(|range| Range::cursor(long_word_start_before(doc, range.head))),
    )
}

/// `E`: end of the next WORD. Punctuation is not a boundary.
pub fn move_next_long_word_end(doc: &Document, selection: &Selection) -> CommandResult {
    CommandResult::Selection(
        selection.transform(|range| Range::cursor(word_end_after(doc, range.head))),
    )
}

/// One past the end of the next whitespace-delimited run. Trailing
/// whitespace alone still moves to the line end. Only a cursor already at
/// the line end scans later lines, skipping blank ones; with nothing left
/// in the document the position is kept.
fn word_end_after(doc: &Document, head: usize) -> usize {
    let line = doc.line_at(head);
    let rest = doc.chars(head, line.to);

    let leading = whitespace_run(rest);
    let word = non_whitespace_run(&rest[leading..]);
    if leading + word > 0 {
        return (head + leading + word).min(doc.len());
    }

    for number in line.number + 1..=doc.line_count() {
        let Some(next) = doc.line(number) else {
            break;
        };
        let text = doc.line_text(&next);
        if is_blank(text) {
            continue;
        }
        let leading = whitespace_run(text);
        let word = non_whitespace_run(&text[leading..]);
        return (next.from + leading + word).min(doc.len());
    }

    head
}

fn long_word_start_after(doc: &Document, head: usize) -> usize {
    let line = doc.line_at(head);
    let rest = doc.chars(head, line.to);

    // Skip the current WORD, then the whitespace after it. Any char left
    // on the line belongs to one of the two runs, so this never stalls.
    let word = non_whitespace_run(rest);
    let skipped = word + whitespace_run(&rest[word..]);

    if head + skipped >= line.to && line.number < doc.line_count() {
        return doc.line(line.number + 1).map_or(head, |next| next.from);
    }

    (head + skipped).min(doc.len())
}

fn long_word_start_before(doc: &Document, head: usize) -> usize {
    if head == 0 {
        return 0;
    }

    let line = doc.line_at(head);
    if let Some(start) = last_long_word_start(doc.chars(line.from, head)) {
        return line.from + start;
    }

    // Nothing before the cursor on this line: nearest non-blank line above
    for number in (1..line.number).rev() {
        let Some(prev) = doc.line(number) else {
            break;
        };
        if let Some(start) = last_long_word_start(doc.line_text(&prev)) {
            return prev.from + start;
        }
    }

    0
}

/// Index of the start of the last WORD in `chars`, never inside
/// whitespace. `None` for blank input.
fn last_long_word_start(chars: &[char]) -> Option<usize> {
    let mut i = chars.len();
    while i > 0 && chars[i - 1].is_whitespace() {
        i -= 1;
    }
    if i == 0 {
        return None;
    }
    while i > 0 && !chars[i - 1].is_whitespace() {
        i -= 1;
    }
    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads(result: CommandResult) -> Vec<usize> {
        match result {
            CommandResult::Selection(selection) => selection.iter().map(|r| r.head).collect(),
            other => panic!("expected a selection, got {:?}", other),
        }
    }

    fn at(doc: &Document, pos: usize, motion: fn(&Document, &Selection) -> CommandResult) -> usize {
        heads(motion(doc, &Selection::point(pos)))[0]
    }

    #[test]
    fn test_word_end_on_single_line() {
        let doc = Document::from_string("foo bar");
        assert_eq!(at(&doc, 0, move_next_word_end), 3);
        assert_eq!(at(&doc, 3, move_next_word_end), 7);
        // Nothing left in the document
        assert_eq!(at(&doc, 7, move_next_word_end), 7);
    }

    #[test]
    fn test_word_end_mid_word() {
        let doc = Document::from_string("hello world");
        assert_eq!(at(&doc, 2, move_next_word_end), 5);
    }

    #[test]
    fn test_word_end_skips_blank_lines() {
        let doc = Document::from_string("foo\n\n   \n  bar baz");
        assert_eq!(at(&doc, 3, move_next_word_end), 14);
    }

    #[test]
    fn test_word_end_trailing_whitespace_stops_at_line_end() {
        let doc = Document::from_string("foo   \nbar");
        assert_eq!(at(&doc, 3, move_next_word_end), 6);
        assert_eq!(at(&doc, 3, move_next_long_word_end), 6);
        // From the line end the scan moves on
        assert_eq!(at(&doc, 6, move_next_word_end), 10);
    }

    #[test]
    fn test_word_end_stops_at_document_end() {
        let doc = Document::from_string("foo\n\n  \n");
        assert_eq!(at(&doc, 3, move_next_word_end), 3);
    }

    #[test]
    fn test_long_word_end_ignores_punctuation() {
        let doc = Document::from_string("foo.bar(baz) qux");
        assert_eq!(at(&doc, 0, move_next_long_word_end), 12);
        assert_eq!(at(&doc, 12, move_next_long_word_end), 16);
    }

    #[test]
    fn test_long_word_start() {
        let doc = Document::from_string("foo  bar");
        assert_eq!(at(&doc, 0, move_next_long_word_start), 5);
        assert_eq!(at(&doc, 5, move_next_long_word_start), 8);
    }

    #[test]
    fn test_long_word_start_wraps_to_next_line() {
        let doc = Document::from_string("foo.bar\n  baz");
        assert_eq!(at(&doc, 0, move_next_long_word_start), 8);
        // From the line end itself
        assert_eq!(at(&doc, 7, move_next_long_word_start), 8);
    }

    #[test]
    fn test_long_word_start_single_char_advances() {
        let doc = Document::from_string("a\nb c");
        assert_eq!(at(&doc, 0, move_next_long_word_start), 2);
        assert_eq!(at(&doc, 4, move_next_long_word_start), 5);
        let doc = Document::from_string("x  ");
        assert_eq!(at(&doc, 1, move_next_long_word_start), 3);
    }

    #[test]
    fn test_long_word_start_at_document_end() {
        let doc = Document::from_string("foo");
        assert_eq!(at(&doc, 3, move_next_long_word_start), 3);
    }

    #[test]
    fn test_prev_long_word_start() {
        let doc = Document::from_string("foo bar");
        assert_eq!(at(&doc, 7, move_prev_long_word_start), 4);
        assert_eq!(at(&doc, 4, move_prev_long_word_start), 0);
        assert_eq!(at(&doc, 5, move_prev_long_word_start), 4);
        assert_eq!(at(&doc, 0, move_prev_long_word_start), 0);
    }

    #[test]
    fn test_prev_long_word_start_never_lands_in_whitespace() {
        let doc = Document::from_string(" a.b  c");
        assert_eq!(at(&doc, 6, move_prev_long_word_start), 1);
        assert_eq!(at(&doc, 3, move_prev_long_word_start), 1);
    }

    #[test]
    fn test_prev_long_word_start_scans_previous_lines() {
        let doc = Document::from_string("one two\n\n   \n  three");
        // From the start of "three" (after leading whitespace)
        assert_eq!(at(&doc, 15, move_prev_long_word_start), 4);
        // From the start of an empty line
        assert_eq!(at(&doc, 8, move_prev_long_word_start), 4);
    }

    #[test]
    fn test_prev_long_word_start_reaches_document_start() {
        let doc = Document::from_string("\n\n  foo");
        assert_eq!(at(&doc, 4, move_prev_long_word_start), 0);
    }

    #[test]
    fn test_motions_keep_cardinality_and_main() {
        let doc = Document::from_string("alpha beta\ngamma delta\nepsilon");
        let selection = Selection::new(
            vec![Range::new(0, 2), Range::cursor(11), Range::cursor(23)],
            2,
        )
        .unwrap();

        let motions: [fn(&Document, &Selection) -> CommandResult; 4] = [
            move_next_word_end,
            move_next_long_word_start,
            move_prev_long_word_start,
            move_next_long_word_end,
        ];
        for motion in motions {
            match motion(&doc, &selection) {
                CommandResult::Selection(next) => {
                    assert_eq!(next.len(), 3);
                    assert_eq!(next.main_index(), 2);
                    assert!(next.iter().all(|r| r.is_empty() && r.head <= doc.len()));
                }
                other => panic!("expected a selection, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_multiple_cursors_move_independently() {
        let doc = Document::from_string("ab cd\nef gh");
        let selection = Selection::new(vec![Range::cursor(0), Range::cursor(6)], 0).unwrap();
        assert_eq!(heads(move_next_word_end(&doc, &selection)), vec![2, 8]);
        assert_eq!(heads(move_next_long_word_start(&doc, &selection)), vec![3, 9]);
    }
}
