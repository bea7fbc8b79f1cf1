use std::collections::VecDeque;

use super::memento::SelectionMemento;

/// Bounded undo/redo stacks of selection snapshots.
///
/// The caller supplies the current snapshot when stepping so it can be moved
/// onto the opposite stack.
#[derive(Debug, Default)]
pub struct SelectionHistory {
    undo_stack: VecDeque<SelectionMemento>,
    redo_stack: VecDeque<SelectionMemento>,
    max_depth: usize,
}

impl SelectionHistory {
    /// Creates a history keeping at most `max_depth` entries per stack.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Records the snapshot taken before a change. Clears the redo stack.
    pub fn record(&mut self, memento: SelectionMemento) {
        push_bounded(&mut self.undo_stack, memento, self.max_depth);
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pops the last recorded snapshot and pushes `current` onto the redo
    /// stack. Returns the snapshot to restore.
    pub fn undo(&mut self, current: SelectionMemento) -> Option<SelectionMemento> {
        let previous = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.max_depth);
        Some(previous)
    }

    /// Pops the last undone snapshot and pushes `current` onto the undo
    /// stack. Returns the snapshot to restore.
    pub fn redo(&mut self, current: SelectionMemento) -> Option<SelectionMemento> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<SelectionMemento>, memento: SelectionMemento, max_depth: usize) {
    if max_depth == 0 {
        return;
    }
    if stack.len() >= max_depth {
        stack.pop_front();
    }
    stack.push_back(memento);
}
