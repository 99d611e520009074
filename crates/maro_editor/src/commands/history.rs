//! Bounded undo/redo history over level snapshots

use log::debug;
use maro_core::Level;
use std::collections::VecDeque;

use crate::config::DEFAULT_HISTORY_CAPACITY;

/// Undo/redo stacks of whole-level snapshots
///
/// The undo stack holds at most `capacity` entries; once full, the oldest
/// entry is dropped to make room. Any new checkpoint clears the redo stack.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<Level>,
    redo_stack: Vec<Level>,
    capacity: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl EditHistory {
    /// Create an empty history keeping up to `capacity` undo steps
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(capacity.max(1)),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record the current state before a mutation
    pub fn checkpoint(&mut self, current: &Level) {
        self.push_snapshot(current.clone());
    }

    /// Record an already captured pre-mutation state
    pub fn push_snapshot(&mut self, snapshot: Level) {
        self.push_undo(snapshot);
        if !self.redo_stack.is_empty() {
            debug!("Discarding {} redo steps", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    fn push_undo(&mut self, snapshot: Level) {
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snapshot);
    }

    /// Restore the most recent checkpoint. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &mut Level) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(current, previous));
        true
    }

    /// Re-apply the most recently undone state. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, current: &mut Level) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let replaced = std::mem::replace(current, next);
        self.push_undo(replaced);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all undo and redo steps
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
