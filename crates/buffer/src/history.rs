//! Edit history (undo/redo)
//!
//! Entries are whole rope snapshots. Ropes share unchanged nodes, so a
//! snapshot costs only the nodes its edit rebuilt.

use std::collections::VecDeque;

use rope::Rope;

use crate::settings::HISTORY_LIMIT;

/// Edit history with undo/redo support
pub struct History {
    /// Ropes before each edit, oldest first
    undo_stack: VecDeque<Rope>,
    /// Ropes undone, most recent last
    redo_stack: Vec<Rope>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_size(HISTORY_LIMIT)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the rope as it was before an edit
    pub fn push(&mut self, previous: Rope) {
        self.redo_stack.clear();
        self.undo_stack.push_back(previous);

        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
            tracing::debug!(max_size = self.max_size, dropped = excess, "undo history full, dropped oldest entries");
        }
    }

    /// Step back: takes the current rope, returns the one to restore
    pub fn undo(&mut self, current: Rope) -> Option<Rope> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Rope) -> Option<Rope> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
