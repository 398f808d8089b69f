use super::document::Document;
use thiserror::Error;

/// Replace `[from, to)` of the pre-edit document with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Edit {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, String::new())
    }

    pub fn is_deletion(&self) -> bool {
        self.insert.is_empty()
    }

    fn inserted_len(&self) -> usize {
        self.insert.chars().count()
    }

    fn deleted_len(&self) -> usize {
        self.to - self.from
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("edit {from}..{to} overlaps a previous edit")]
    Overlapping { from: usize, to: usize },
    #[error("edit ends at {to} but the document is {len} chars long")]
    OutOfBounds { to: usize, len: usize },
    #[error("changes were built for a {expected} char document, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Which side of an insertion a mapped position sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// A batch of edits applied atomically. All offsets refer to the
/// document the set was built against.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    edits: Vec<Edit>,
    doc_len: usize,
}

impl ChangeSet {
    pub fn new(mut edits: Vec<Edit>, doc_len: usize) -> Result<Self, EditError> {
        // Stable sort keeps insertions at the same offset in their given order
        edits.sort_by_key(|edit| edit.from);

        let mut prev_to = 0;
        for edit in &edits {
            if edit.to > doc_len {
                return Err(EditError::OutOfBounds {
                    to: edit.to,
                    len: doc_len,
                });
            }
            if edit.from < prev_to {
                return Err(EditError::Overlapping {
                    from: edit.from,
                    to: edit.to,
                });
            }
            prev_to = edit.to;
        }

        Ok(Self { edits, doc_len })
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn apply(&self, document: &Document) -> Result<Document, EditError> {
        if document.len() != self.doc_len {
            return Err(EditError::LengthMismatch {
                expected: self.doc_len,
                actual: document.len(),
            });
        }

        let source = document.chars(0, document.len());
        let mut chars = Vec::with_capacity(source.len());
        let mut copied_to = 0;
        for edit in &self.edits {
            chars.extend_from_slice(&source[copied_to..edit.from]);
            chars.extend(edit.insert.chars());
            copied_to = edit.to;
        }
        chars.extend_from_slice(&source[copied_to..]);

        Ok(Document::from_chars(chars).with_line_ending(document.line_ending()))
    }

    /// Map a pre-edit offset into the post-edit document. Offsets inside
    /// a replaced span collapse onto it; `assoc` picks the side.
    pub fn map_pos(&self, pos: usize, assoc: Assoc) -> usize {
        let mut delta: isize = 0;

        for edit in &self.edits {
            let deleted = edit.deleted_len() as isize;
            let inserted = edit.inserted_len() as isize;

            if pos < edit.from {
                break;
            }
            if pos > edit.to || (pos == edit.to && deleted > 0) {
                delta += inserted - deleted;
                continue;
            }
            if deleted == 0 {
                // Pure insertion exactly at pos
                if assoc == Assoc::After {
                    delta += inserted;
                    continue;
                }
                break;
            }

            let start = edit.from as isize + delta;
            let mapped = match assoc {
                Assoc::Before => start,
                Assoc::After => start + inserted,
            };
            return mapped.max(0) as usize;
        }

        (pos as isize + delta).max(0) as usize
    }

    /// Length of the document after applying this set.
    pub fn new_len(&self) -> usize {
        let delta: isize = self
            .edits
            .iter()
            .map(|edit| edit.inserted_len() as isize - edit.deleted_len() as isize)
            .sum();
        (self.doc_len as isize + delta).max(0) as usize
    }
}
