//! Indicator layers painted over document ranges.
//!
//! Each indicator id owns a sorted list of non-overlapping runs. Runs move
//! with the text: an insertion strictly inside a run grows it, an insertion at
//! or before its start shifts it.

use std::collections::BTreeMap;
use std::ops::Range;

/// A painted range of one indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorRun {
    pub start: usize,
    pub end: usize,
    pub value: i32,
}

impl IndicatorRun {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Shift a range for `len` bytes inserted at `position`.
pub(crate) fn shift_range_for_insert(range: &mut Range<usize>, position: usize, len: usize) {
    if range.start >= position {
        range.start += len;
        range.end += len;
    } else if range.end > position {
        range.end += len;
    }
}

/// Shift a range for `len` bytes deleted at `position`.
pub(crate) fn shift_range_for_delete(range: &mut Range<usize>, position: usize, len: usize) {
    let map = |p: usize| {
        if p <= position {
            p
        } else if p >= position + len {
            p - len
        } else {
            position
        }
    };
    range.start = map(range.start);
    range.end = map(range.end);
}

/// All indicator layers of a document.
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    current: usize,
    layers: BTreeMap<usize, Vec<IndicatorRun>>,
}

impl Decorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current(&mut self, indicator: usize) {
        self.current = indicator;
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Paint `value` over `position..position + len` on the current indicator
    pub fn fill(&mut self, position: usize, value: i32, len: usize) {
        if len == 0 {
            return;
        }
        let end = position + len;
        let runs = self.layers.entry(self.current).or_default();

        // Cut the filled range out of existing runs
        let mut kept = Vec::with_capacity(runs.len() + 2);
        for run in runs.drain(..) {
            if run.end <= position || run.start >= end {
                kept.push(run);
                continue;
            }
            if run.start < position {
                kept.push(IndicatorRun {
                    start: run.start,
                    end: position,
                    value: run.value,
                });
            }
            if run.end > end {
                kept.push(IndicatorRun {
                    start: end,
                    end: run.end,
                    value: run.value,
                });
            }
        }
        if value != 0 {
            kept.push(IndicatorRun {
                start: position,
                end,
                value,
            });
        }
        kept.sort_by_key(|r| r.start);

        // Merge touching runs of equal value
        let mut merged: Vec<IndicatorRun> = Vec::with_capacity(kept.len());
        for run in kept {
            match merged.last_mut() {
                Some(last) if last.end == run.start && last.value == run.value => {
                    last.end = run.end;
                }
                _ => merged.push(run),
            }
        }
        *runs = merged;
    }

    pub fn runs(&self, indicator: usize) -> Vec<IndicatorRun> {
        self.layers.get(&indicator).cloned().unwrap_or_default()
    }

    /// Value of `indicator` at `position` (0 when unpainted)
    pub fn value_at(&self, indicator: usize, position: usize) -> i32 {
        self.layers
            .get(&indicator)
            .and_then(|runs| runs.iter().find(|r| r.range().contains(&position)))
            .map(|r| r.value)
            .unwrap_or(0)
    }

    pub fn insert_space(&mut self, position: usize, len: usize) {
        for runs in self.layers.values_mut() {
            for run in runs.iter_mut() {
                let mut range = run.range();
                shift_range_for_insert(&mut range, position, len);
                run.start = range.start;
                run.end = range.end;
            }
        }
    }

    pub fn delete_space(&mut self, position: usize, len: usize) {
        for runs in self.layers.values_mut() {
            for run in runs.iter_mut() {
                let mut range = run.range();
                shift_range_for_delete(&mut range, position, len);
                run.start = range.start;
                run.end = range.end;
            }
            runs.retain(|r| !r.is_empty());
        }
    }
}
