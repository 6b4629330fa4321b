//! Undo/Redo snapshot stack.
//!
//! Every structural edit is recorded as a whole-tree `Snapshot` of the state
//! *before* the edit. Trees share structure, so a snapshot costs a pointer
//! copy rather than a deep clone.
//!
//! Drag gestures use **pre-drag capture**: the first move of a gesture
//! captures the state, later moves are applied live without touching the
//! stacks, and `commit_capture` pushes the captured state as one undo step.

use mm_core::id::NodeId;
use mm_core::model::MindTree;

/// Editor state restored by undo/redo.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: MindTree,
    pub selected: NodeId,
}

/// Manages undo/redo stacks with a single pending drag capture.
pub struct CommandStack {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Maximum undo depth.
    max_depth: usize,
    /// State captured by the first move of the current drag.
    capture: Option<Snapshot>,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
            capture: None,
        }
    }

    /// Record the state before an edit. Clears the redo stack.
    pub fn push(&mut self, before: Snapshot) {
        self.undo_stack.push(before);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Capture the pre-drag state unless a capture is already pending.
    /// Returns `true` when this call captured.
    pub fn capture(&mut self, before: Snapshot) -> bool {
        if self.capture.is_some() {
            return false;
        }
        self.capture = Some(before);
        true
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Take the pending capture without recording it.
    pub fn take_capture(&mut self) -> Option<Snapshot> {
        self.capture.take()
    }

    /// Push the pending capture as one undo step. No capture → no-op.
    pub fn commit_capture(&mut self) -> bool {
        match self.capture.take() {
            Some(before) => {
                self.push(before);
                true
            }
            None => false,
        }
    }

    /// Pop the last recorded state; `current` goes onto the redo stack.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Pop the last undone state; `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Forget everything, pending capture included.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.capture = None;
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::model::Node;
    use pretty_assertions::assert_eq;

    fn snap(name: &str) -> Snapshot {
        let id = NodeId::intern("cs_root");
        Snapshot {
            tree: MindTree::new(Node::new(id, name)),
            selected: id,
        }
    }

    #[test]
    fn undo_redo_swap_states() {
        let mut stack = CommandStack::new(10);
        stack.push(snap("v0"));
        let restored = stack.undo(snap("v1")).unwrap();
        assert_eq!(restored, snap("v0"));
        assert!(stack.can_redo());
        let again = stack.redo(snap("v0")).unwrap();
        assert_eq!(again, snap("v1"));
        assert!(!stack.can_redo());
        assert!(stack.can_undo());
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut stack = CommandStack::new(10);
        assert!(stack.undo(snap("x")).is_none());
        assert!(stack.redo(snap("x")).is_none());
        assert!(!stack.can_redo());
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut stack = CommandStack::new(3);
        for i in 0..5 {
            stack.push(snap(&format!("v{i}")));
        }
        assert_eq!(stack.undo_depth(), 3);
        let mut names = Vec::new();
        while let Some(s) = stack.undo(snap("cur")) {
            names.push(s.tree.root().name.clone());
        }
        assert_eq!(names, vec!["v4", "v3", "v2"]);
    }

    #[test]
    fn push_clears_redo() {
        let mut stack = CommandStack::new(10);
        stack.push(snap("a"));
        stack.undo(snap("b"));
        assert!(stack.can_redo());
        stack.push(snap("c"));
        assert!(!stack.can_redo());
    }

    #[test]
    fn capture_commits_once() {
        let mut stack = CommandStack::new(10);
        assert!(stack.capture(snap("before")));
        assert!(!stack.capture(snap("later")));
        assert!(stack.commit_capture());
        assert!(!stack.commit_capture());
        assert_eq!(stack.undo_depth(), 1);
        assert_eq!(stack.undo(snap("now")).unwrap(), snap("before"));
    }
}
