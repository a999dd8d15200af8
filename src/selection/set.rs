//! The set of selection ranges, primary first.

use super::{SelectionPosition, SelectionRange};

/// Every selection range of the editor. Never empty; index 0 is the primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ranges: Vec<SelectionRange>,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self {
            ranges: vec![SelectionRange::default()],
        }
    }

    pub fn primary(&self) -> &SelectionRange {
        &self.ranges[0]
    }

    pub fn primary_mut(&mut self) -> &mut SelectionRange {
        &mut self.ranges[0]
    }

    /// Ordered, restartable view of all ranges (primary first)
    pub fn ranges(&self) -> std::slice::Iter<'_, SelectionRange> {
        self.ranges.iter()
    }

    pub fn count(&self) -> usize {
        self.ranges.len()
    }

    pub fn get(&self, index: usize) -> Option<&SelectionRange> {
        self.ranges.get(index)
    }

    /// Replace everything with one range, direction preserved
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        self.set_range_only(SelectionRange::from_offsets(anchor, caret));
    }

    pub fn set_range_only(&mut self, range: SelectionRange) {
        self.ranges.clear();
        self.ranges.push(range);
    }

    /// Selection from two IME offsets: the smaller becomes the caret and the
    /// larger the anchor, whatever the argument order.
    pub fn set_selection_normalized(&mut self, a: usize, b: usize) {
        self.set_selection(a.max(b), a.min(b));
    }

    /// Single caret at `position`
    pub fn set_empty(&mut self, position: usize) {
        self.set_selection(position, position);
    }

    /// Add a range that becomes the new primary
    pub fn add_range(&mut self, range: SelectionRange) {
        self.ranges.insert(0, range);
    }

    pub fn set_range(&mut self, index: usize, range: SelectionRange) {
        if let Some(slot) = self.ranges.get_mut(index) {
            *slot = range;
        }
    }

    /// Drop all ranges except the primary
    pub fn collapse_to_primary(&mut self) {
        self.ranges.truncate(1);
    }

    /// Shift every anchor and caret by `delta` bytes, clamped to the document
    pub fn move_all_carets_by(&mut self, delta: isize, doc_len: usize) {
        let shift = |pos: &mut SelectionPosition| {
            let moved = (pos.position as isize + delta).clamp(0, doc_len as isize);
            *pos = SelectionPosition::new(moved as usize);
        };
        for range in &mut self.ranges {
            shift(&mut range.anchor);
            shift(&mut range.caret);
        }
    }

    pub fn adjust_for_insert(&mut self, position: usize, len: usize) {
        for range in &mut self.ranges {
            range.anchor.move_for_insert(position, len);
            range.caret.move_for_insert(position, len);
        }
    }

    pub fn adjust_for_delete(&mut self, position: usize, len: usize) {
        for range in &mut self.ranges {
            range.anchor.move_for_delete(position, len);
            range.caret.move_for_delete(position, len);
        }
    }

    /// Clamp every range into `[0, doc_len]`
    pub fn clamp(&mut self, doc_len: usize) {
        for range in &mut self.ranges {
            range.clamp(doc_len);
        }
    }

    /// Whether `position` lies inside any non-empty range
    pub fn contains_position(&self, position: usize) -> bool {
        self.ranges
            .iter()
            .any(|r| !r.is_empty() && r.contains(position))
    }

    pub fn has_non_empty(&self) -> bool {
        self.ranges.iter().any(|r| !r.is_empty())
    }

    /// Merge overlapping or duplicate ranges. The primary stays first; a
    /// merged range keeps the direction of its primary member, if any.
    pub fn normalize(&mut self) {
        if self.ranges.len() < 2 {
            return;
        }

        let mut order: Vec<usize> = (0..self.ranges.len()).collect();
        order.sort_by_key(|&i| (self.ranges[i].start(), self.ranges[i].end()));

        // (merged range, contains primary)
        let mut merged: Vec<(SelectionRange, bool)> = Vec::with_capacity(order.len());
        for i in order {
            let range = self.ranges[i];
            let is_primary = i == 0;
            match merged.last_mut() {
                Some((last, last_primary)) if last.overlaps(&range) => {
                    let start = last.start().min(range.start());
                    let end = last.end().max(range.end());
                    let reversed = if is_primary {
                        range.is_reversed()
                    } else {
                        last.is_reversed()
                    };
                    *last = if reversed {
                        SelectionRange::new(end, start)
                    } else {
                        SelectionRange::new(start, end)
                    };
                    *last_primary |= is_primary;
                }
                _ => merged.push((range, is_primary)),
            }
        }

        let primary_index = merged.iter().position(|(_, p)| *p).unwrap_or(0);
        let primary = merged.remove(primary_index).0;
        self.ranges.clear();
        self.ranges.push(primary);
        self.ranges.extend(merged.into_iter().map(|(r, _)| r));
    }
}
