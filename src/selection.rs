use crate::document_model::{Assoc, ChangeSet};
use thiserror::Error;

/// One cursor or selection span. `head` is the end motions move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub anchor: usize,
    pub head: usize,
}

impl Range {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn len(&self) -> usize {
        self.to() - self.from()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn is_forward(&self) -> bool {
        self.anchor <= self.head
    }

    /// Same span with anchor <= head.
    pub fn forward(&self) -> Self {
        Self::new(self.from(), self.to())
    }

    pub fn map(&self, changes: &ChangeSet) -> Self {
        if self.is_empty() {
            return Self::cursor(changes.map_pos(self.head, Assoc::Before));
        }
        let from = changes.map_pos(self.from(), Assoc::After);
        let to = changes.map_pos(self.to(), Assoc::Before).max(from);
        if self.is_forward() {
            Self::new(from, to)
        } else {
            Self::new(to, from)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("a selection needs at least one range")]
    Empty,
    #[error("main index {main} is out of bounds for {len} ranges")]
    MainOutOfBounds { main: usize, len: usize },
}

/// Ordered, non-empty set of ranges with a distinguished main range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Range>,
    main: usize,
}

impl Selection {
    pub fn new(ranges: Vec<Range>, main: usize) -> Result<Self, SelectionError> {
        if ranges.is_empty() {
            return Err(SelectionError::Empty);
        }
        if main >= ranges.len() {
            return Err(SelectionError::MainOutOfBounds {
                main,
                len: ranges.len(),
            });
        }
        Ok(Self { ranges, main })
    }

    pub fn single(range: Range) -> Self {
        Self {
            ranges: vec![range],
            main: 0,
        }
    }

    pub fn point(pos: usize) -> Self {
        Self::single(Range::cursor(pos))
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn main_index(&self) -> usize {
        self.main
    }

    pub fn main(&self) -> Range {
        self.ranges[self.main]
    }

    /// Transform every range independently, keeping order and main index.
    pub fn transform<F>(&self, f: F) -> Self
    where
        F: FnMut(&Range) -> Range,
    {
        Self {
            ranges: self.ranges.iter().map(f).collect(),
            main: self.main,
        }
    }

    pub fn map(&self, changes: &ChangeSet) -> Self {
        self.transform(|range| range.map(changes))
    }

    /// Sort ranges by position and merge overlapping ones, tracking the
    /// main range through the merge. A cursor touching either end of a
    /// span merges into it; two spans that only touch stay apart.
    pub fn normalized(&self) -> Self {
        let mut indexed: Vec<(usize, Range)> = self.ranges.iter().copied().enumerate().collect();
        indexed.sort_by_key(|(_, range)| (range.from(), range.to()));

        let mut ranges: Vec<Range> = Vec::with_capacity(indexed.len());
        let mut main = 0;
        for (original_idx, range) in indexed {
            let merges = match ranges.last() {
                Some(prev) if range.is_empty() || prev.is_empty() => range.from() <= prev.to(),
                Some(prev) => range.from() < prev.to(),
                None => false,
            };

            if let Some(prev) = ranges.last_mut().filter(|_| merges) {
                let from = prev.from();
                let to = prev.to().max(range.to());
                // A span keeps its direction when a cursor joins it
                let forward = if prev.is_empty() {
                    range.is_forward()
                } else {
                    prev.is_forward()
                };
                *prev = if forward {
                    Range::new(from, to)
                } else {
                    Range::new(to, from)
                };
            } else {
                ranges.push(range);
            }

            if original_idx == self.main {
                main = ranges.len() - 1;
            }
        }

        Self { ranges, main }
    }
}

impl From<Range> for Selection {
    fn from(range: Range) -> Self {
        Self::single(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::Edit;

    #[test]
    fn test_range_bounds() {
        let range = Range::new(7, 2);
        assert_eq!(range.from(), 2);
        assert_eq!(range.to(), 7);
        assert_eq!(range.len(), 5);
        assert!(!range.is_forward());
        assert_eq!(range.forward(), Range::new(2, 7));
    }

    #[test]
    fn test_new_validates() {
        assert_eq!(Selection::new(vec![], 0), Err(SelectionError::Empty));
        assert_eq!(
            Selection::new(vec![Range::cursor(1)], 1),
            Err(SelectionError::MainOutOfBounds { main: 1, len: 1 })
        );
    }

    #[test]
    fn test_transform_keeps_main() {
        let selection =
            Selection::new(vec![Range::cursor(0), Range::cursor(4), Range::cursor(9)], 1).unwrap();
        let moved = selection.transform(|range| Range::cursor(range.head + 1));
        assert_eq!(moved.len(), 3);
        assert_eq!(moved.main_index(), 1);
        assert_eq!(moved.main(), Range::cursor(5));
    }

    #[test]
    fn test_normalized_merges_and_tracks_main() {
        let selection = Selection::new(
            vec![Range::new(10, 14), Range::new(0, 5), Range::new(3, 8), Range::cursor(20)],
            2,
        )
        .unwrap();
        let normalized = selection.normalized();
        assert_eq!(
            normalized.ranges(),
            &[Range::new(0, 8), Range::new(10, 14), Range::cursor(20)]
        );
        assert_eq!(normalized.main_index(), 0);
    }

    #[test]
    fn test_normalized_merges_duplicate_cursors() {
        let selection =
            Selection::new(vec![Range::cursor(4), Range::cursor(4), Range::cursor(1)], 1).unwrap();
        let normalized = selection.normalized();
        assert_eq!(normalized.ranges(), &[Range::cursor(1), Range::cursor(4)]);
        assert_eq!(normalized.main_index(), 1);
    }

    #[test]
    fn test_normalized_cursor_touching_either_end() {
        let at_start =
            Selection::new(vec![Range::new(5, 8), Range::cursor(5)], 1).unwrap().normalized();
        assert_eq!(at_start.ranges(), &[Range::new(5, 8)]);
        assert_eq!(at_start.main_index(), 0);

        let at_end =
            Selection::new(vec![Range::cursor(8), Range::new(5, 8)], 0).unwrap().normalized();
        assert_eq!(at_end.ranges(), &[Range::new(5, 8)]);

        let backward =
            Selection::new(vec![Range::cursor(5), Range::new(8, 5)], 0).unwrap().normalized();
        assert_eq!(backward.ranges(), &[Range::new(8, 5)]);
    }

    #[test]
    fn test_normalized_keeps_touching_spans_apart() {
        let selection = Selection::new(vec![Range::new(0, 3), Range::new(3, 6)], 0).unwrap();
        assert_eq!(
            selection.normalized().ranges(),
            &[Range::new(0, 3), Range::new(3, 6)]
        );
    }

    #[test]
    fn test_map_through_deletion() {
        // "foo bar" with cursors after "foo" and after "bar", delete "foo"
        let changes = ChangeSet::new(vec![Edit::delete(0, 3)], 7).unwrap();
        let selection = Selection::new(vec![Range::cursor(3), Range::new(4, 7)], 0).unwrap();
        let mapped = selection.map(&changes);
        assert_eq!(mapped.ranges(), &[Range::cursor(0), Range::new(1, 4)]);
    }
}
