//! Snapshot-based undo/redo over the layer sequence.

use crate::layer::Layer;

/// Maximum number of undo states to keep. The oldest snapshot is evicted
/// once the cap is exceeded.
pub const MAX_UNDO_HISTORY: usize = 50;

/// An owned copy of the full ordered layer sequence. Snapshots never alias
/// the live sequence.
pub type Snapshot = Vec<Layer>;

/// Two-stack undo/redo state machine.
///
/// Callers hand in the *current* sequence on every transition; the history
/// itself never looks at live state. `record` is called immediately before
/// a mutation with the pre-mutation sequence.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a pre-mutation snapshot. Clears the redo stack: recording a new
    /// mutation abandons any undone branch.
    pub fn record(&mut self, current: Snapshot) {
        self.past.push(current);
        if self.past.len() > MAX_UNDO_HISTORY {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Step back one snapshot. `current` is parked on the redo stack and the
    /// previous sequence is returned; `None` if there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward one snapshot. Symmetric to [`History::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
