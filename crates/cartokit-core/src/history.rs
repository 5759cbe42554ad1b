// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Undo/redo stacks of `(diff, inverse)` pairs.

use std::collections::VecDeque;

use crate::config::HistoryConfig;
use crate::diff::Diff;

/// One applied diff with the diff that undoes it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The diff as applied.
    pub diff: Diff,
    /// Its inverse against the document it was applied to.
    pub inverse: Diff,
}

/// Undo and redo stacks.
///
/// The undo stack is bounded by [`HistoryConfig::limit`]; when full, the
/// oldest entry is dropped.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    config: HistoryConfig,
}

impl History {
    /// Empty history with the given policy.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            config,
        }
    }

    /// Record a freshly applied diff.
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.config.clear_redo_on_new_diff {
            self.redo.clear();
        }
        self.push_undo(entry);
    }

    /// Push onto the undo stack without touching redo.
    pub(crate) fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo.push_back(entry);
        if let Some(limit) = self.config.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop_back()
    }

    pub(crate) fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Entries on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Entries on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo.iter()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{payload, MapDiff};

    fn entry(zoom: f64) -> HistoryEntry {
        HistoryEntry {
            diff: Diff::MapZoom(MapDiff::new(payload::MapZoom { zoom })),
            inverse: Diff::MapZoom(MapDiff::new(payload::MapZoom { zoom: 0.0 })),
        }
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = History::new(HistoryConfig {
            limit: Some(2),
            clear_redo_on_new_diff: true,
        });
        for zoom in [1.0, 2.0, 3.0] {
            history.record(entry(zoom));
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo_entries().next(), Some(&entry(2.0)));
    }

    #[test]
    fn fresh_diff_clears_redo_unless_configured() {
        let mut history = History::default();
        history.push_redo(entry(1.0));
        history.record(entry(2.0));
        assert!(!history.can_redo());

        let mut keep = History::new(HistoryConfig {
            limit: None,
            clear_redo_on_new_diff: false,
        });
        keep.push_redo(entry(1.0));
        keep.record(entry(2.0));
        assert_eq!(keep.redo_len(), 1);
    }
}
