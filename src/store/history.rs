use crate::state::DesignState;

/// Undo/redo stacks of whole-design snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// States that can be restored by undo, oldest first
    undo_stack: Vec<DesignState>,
    /// States that can be restored by redo, most recently undone last
    redo_stack: Vec<DesignState>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record the state as it was before a mutation. Clears the redo stack.
    pub fn record(&mut self, before: DesignState) {
        if self.limit == 0 {
            return;
        }
        self.undo_stack.push(before);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Swap `current` for the previous state. Returns the state to restore.
    pub fn undo(&mut self, current: DesignState) -> Option<DesignState> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Swap `current` for the most recently undone state
    pub fn redo(&mut self, current: DesignState) -> Option<DesignState> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
