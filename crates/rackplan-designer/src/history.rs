//! Snapshot history for undo/redo.
//!
//! Unlike a command stack, every entry is a full copy of the element set
//! after a committed mutation. `index` points at the snapshot that matches
//! the current document; undo and redo just move it.

use crate::model::Element;
use chrono::{DateTime, Utc};

/// Default number of snapshots kept.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 50;

/// Element set captured after a committed mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub elements: Vec<Element>,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl HistorySnapshot {
    pub fn new(elements: Vec<Element>, description: impl Into<String>) -> Self {
        Self {
            elements,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

/// What the history is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPhase {
    /// Accepting new snapshots.
    #[default]
    Idle,
    /// A snapshot is being applied to the document; pushes are ignored so
    /// the application does not record itself.
    ApplyingHistory,
}

/// Bounded undo/redo history.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistorySnapshot>,
    index: Option<usize>,
    max_length: usize,
    phase: HistoryPhase,
}

impl HistoryManager {
    /// Creates a history with the default capacity.
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_HISTORY_LENGTH)
    }

    /// Creates a history keeping at most `max_length` snapshots (at least 1).
    pub fn with_max_length(max_length: usize) -> Self {
        let max_length = max_length.max(1);
        Self {
            entries: Vec::with_capacity(max_length),
            index: None,
            max_length,
            phase: HistoryPhase::Idle,
        }
    }

    /// Records a snapshot. Ignored while a snapshot is being applied.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        if self.phase != HistoryPhase::Idle {
            tracing::debug!(
                "Ignoring history push '{}' while applying history",
                snapshot.description
            );
            return;
        }

        // Drop the redo branch
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);

        self.entries.push(snapshot);

        if self.entries.len() > self.max_length {
            self.entries.remove(0);
        }

        self.index = Some(self.entries.len() - 1);
    }

    /// Steps back one snapshot and returns it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<HistorySnapshot> {
        let index = self.index.filter(|i| *i > 0)?;
        self.index = Some(index - 1);
        let snapshot = self.entries.get(index - 1).cloned();
        if let Some(s) = &snapshot {
            tracing::info!("Undo to '{}'", s.description);
        }
        snapshot
    }

    /// Steps forward one snapshot and returns it, or `None` at the newest.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        let next = self.index? + 1;
        if next >= self.entries.len() {
            return None;
        }
        self.index = Some(next);
        let snapshot = self.entries.get(next).cloned();
        if let Some(s) = &snapshot {
            tracing::info!("Redo to '{}'", s.description);
        }
        snapshot
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Marks the start of applying a snapshot to the document.
    pub fn begin_apply(&mut self) {
        self.phase = HistoryPhase::ApplyingHistory;
    }

    /// Marks the end of applying a snapshot to the document.
    pub fn end_apply(&mut self) {
        self.phase = HistoryPhase::Idle;
    }

    pub fn phase(&self) -> HistoryPhase {
        self.phase
    }

    /// Current index, `None` when empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Changes the capacity. Snapshots older than the current one go first,
    /// then the redo tail; the current snapshot is always kept.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length.max(1);
        let excess = self.entries.len().saturating_sub(self.max_length);
        let older = excess.min(self.index.unwrap_or(0));
        self.entries.drain(..older);
        self.index = self.index.map(|i| i - older);
        self.entries.truncate(self.max_length);
        if excess > 0 {
            tracing::debug!(
                "History capacity now {}, dropped {} snapshots",
                self.max_length,
                excess
            );
        }
    }

    /// Snapshot matching the current document, if any.
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.index.and_then(|i| self.entries.get(i))
    }

    /// Descriptions oldest first.
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.description.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
        self.phase = HistoryPhase::Idle;
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}
