use super::CommandResult;
use crate::document_model::{Document, Edit};
use crate::selection::{Range, Selection};

/// Full lines covered by one range and where their copy goes.
#[derive(Debug, Clone, PartialEq)]
struct LineCopy {
    insert_at: usize,
    text: String,
    len: usize,
}

/// `C`: duplicate the lines under every range below themselves and select
/// the copies. New ranges keep the order of the ranges they came from; the
/// main range of the result is the last copy.
pub fn copy_selection_on_next_line(doc: &Document, selection: &Selection) -> CommandResult {
    let copies = plan_copies(doc, selection);
    let separator_len = doc.line_break().chars().count();

    let edits = copies
        .iter()
        .map(|copy| Edit::insert(copy.insert_at, format!("{}{}", doc.line_break(), copy.text)))
        .collect();
    let ranges = place_copies(&copies, separator_len);

    let main = copies.len().saturating_sub(1);

    CommandResult::Edit {
        edits,
        selection: Selection::new(ranges, main).ok(),
    }
}

// Map step: each range on its own, against the unedited document.
fn plan_copies(doc: &Document, selection: &Selection) -> Vec<LineCopy> {
    selection
        .iter()
        .map(|range| {
            let start = doc.line_at(range.from());
            let end = doc.line_at(range.to());
            let text = doc.slice(start.from, end.to);
            LineCopy {
                insert_at: end.to,
                len: text.chars().count(),
                text,
            }
        })
        .collect()
}

// Reduce step: insertions land in document order (ties by selection
// order), and each one pushes every copy placed after it further down.
fn place_copies(copies: &[LineCopy], separator_len: usize) -> Vec<Range> {
    let mut order: Vec<usize> = (0..copies.len()).collect();
    order.sort_by_key(|&idx| copies[idx].insert_at);

    let mut ranges = vec![Range::cursor(0); copies.len()];
    let mut shift = 0;
    for idx in order {
        let copy = &copies[idx];
        let start = copy.insert_at + shift + separator_len;
        shift += separator_len + copy.len;
        ranges[idx] = Range::new(start, start + copy.len);
    }
    ranges
}
