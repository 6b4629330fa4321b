//! Editor session: the single owner of tree, selection and history.
//!
//! Every user-visible operation goes through `EditorSession`. Structural
//! edits snapshot the current state onto the undo stack, replace the tree,
//! persist to the store and notify subscribers. Edits the model refuses are
//! silent no-ops (logged at debug level) and return `false`.

use crate::commands::{CommandStack, Snapshot};
use crate::store::{SELECTED_KEY, SnapshotStore, TREE_KEY};
use mm_core::codec::{self, CodecError};
use mm_core::edit::{self, EditRejection};
use mm_core::id::NodeId;
use mm_core::layout::{Layout, LayoutConfig, Viewport, radial_layout};
use mm_core::model::{MindTree, Node, default_tree};
use std::cell::OnceCell;

/// Interaction tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Undo capacity. Default: **10**.
    pub history_depth: usize,
    /// Reparent search radius in screen pixels. Default: **60**.
    pub pick_radius: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor per wheel notch. Default: **1.1**.
    pub wheel_zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 10,
            pick_radius: 60.0,
            min_zoom: 0.4,
            max_zoom: 2.5,
            wheel_zoom_step: 1.1,
        }
    }
}

/// Notifications delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    TreeChanged,
    SelectionChanged,
    Resized,
    /// The host should open a rename prompt for this node.
    RenameRequested(NodeId),
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&SessionEvent)>;

pub struct EditorSession<S: SnapshotStore> {
    tree: MindTree,
    selected: NodeId,
    history: CommandStack,
    viewport: Viewport,
    config: EditorConfig,
    layout_config: LayoutConfig,
    /// Last layout, dropped whenever tree or viewport change.
    layout: OnceCell<Layout>,
    store: S,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl<S: SnapshotStore> EditorSession<S> {
    /// Restore state from `store`, or start from the default tree when the
    /// stored tree is absent or unreadable.
    pub fn init(store: S, viewport: Viewport, config: EditorConfig) -> Self {
        let tree = match store.get(TREE_KEY) {
            Some(json) => match codec::from_persisted_json(&json) {
                Ok(tree) => tree,
                Err(e) => {
                    log::warn!("stored tree is unreadable ({e}), starting from the default tree");
                    default_tree()
                }
            },
            None => default_tree(),
        };
        let selected = store
            .get(SELECTED_KEY)
            .and_then(|s| NodeId::lookup(&s))
            .filter(|id| tree.contains(*id))
            .unwrap_or_else(|| tree.root_id());

        let mut session = Self {
            tree,
            selected,
            history: CommandStack::new(config.history_depth),
            viewport,
            config,
            layout_config: LayoutConfig::default(),
            layout: OnceCell::new(),
            store,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        session.persist_tree();
        session
    }

    /// Drop every subscriber, flush the store and hand it back.
    pub fn teardown(mut self) -> S {
        self.listeners.clear();
        self.store.flush();
        self.store
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> Subscription {
        let handle = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Returns `false` if the handle was already gone.
    pub fn unsubscribe(&mut self, handle: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn tree(&self) -> &MindTree {
        &self.tree
    }

    pub fn selected(&self) -> NodeId {
        self.selected
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current layout, recomputed only after the tree or viewport changed.
    pub fn layout(&self) -> &Layout {
        self.layout
            .get_or_init(|| radial_layout(&self.tree, self.viewport, &self.layout_config))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tree: self.tree.clone(),
            selected: self.selected,
        }
    }

    // ─── State changes ───────────────────────────────────────────────────

    fn persist_tree(&mut self) {
        match codec::to_persisted_json(&self.tree) {
            Ok(json) => self.store.set(TREE_KEY, &json),
            Err(e) => log::warn!("could not serialize tree: {e}"),
        }
        self.persist_selection();
    }

    fn persist_selection(&mut self) {
        let id = self.selected;
        self.store.set(SELECTED_KEY, id.as_str());
    }

    fn set_tree(&mut self, tree: MindTree) {
        self.tree = tree;
        self.layout = OnceCell::new();
        self.persist_tree();
        self.emit(SessionEvent::TreeChanged);
    }

    fn set_selected(&mut self, id: NodeId) {
        if self.selected == id {
            return;
        }
        self.selected = id;
        self.persist_selection();
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Push the current state as an undo step. A drag still in progress is
    /// committed first so its pre-drag state stays below this entry.
    fn record(&mut self) {
        if self.history.commit_capture() {
            log::debug!("pending drag committed before edit");
        }
        let before = self.snapshot();
        self.history.push(before);
    }

    /// Record the current state, then install an accepted edit.
    fn commit(&mut self, op: &str, result: Result<MindTree, EditRejection>) -> bool {
        match result {
            Ok(next) => {
                self.record();
                self.set_tree(next);
                true
            }
            Err(e) => {
                log::debug!("{op} ignored: {e}");
                false
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        let tree_changed = snapshot.tree != self.tree;
        if tree_changed {
            self.set_tree(snapshot.tree);
        }
        self.set_selected(snapshot.selected);
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Append a "New Node" under `parent` and select the parent.
    pub fn add_child(&mut self, parent: NodeId) -> Option<NodeId> {
        match edit::add_child(&self.tree, parent) {
            Ok((next, child)) => {
                self.record();
                self.set_tree(next);
                self.set_selected(parent);
                Some(child)
            }
            Err(e) => {
                log::debug!("add child ignored: {e}");
                None
            }
        }
    }

    /// Remove `id`'s subtree and select the root.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let done = self.commit("delete", edit::delete_node(&self.tree, id));
        if done {
            self.set_selected(self.tree.root_id());
        }
        done
    }

    pub fn rename_node(&mut self, id: NodeId, name: &str) -> bool {
        self.commit("rename", edit::rename_node(&self.tree, id, name))
    }

    pub fn toggle_collapse(&mut self, id: NodeId) -> bool {
        self.commit("toggle collapse", edit::toggle_collapse(&self.tree, id))
    }

    /// Move `child` under `new_parent`; the moved node becomes the selection.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> bool {
        let done = self.commit("reparent", edit::reparent(&self.tree, child, new_parent));
        if done {
            self.set_selected(child);
        }
        done
    }

    /// Pin `id` at `(x, y)`. The first move of a gesture captures the
    /// pre-drag state; no move pushes history by itself.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        match edit::move_node(&self.tree, id, x, y) {
            Ok(next) => {
                if !self.history.is_capturing() {
                    let before = self.snapshot();
                    self.history.capture(before);
                }
                self.set_tree(next);
                true
            }
            Err(e) => {
                log::debug!("move ignored: {e}");
                false
            }
        }
    }

    /// Push the pre-drag state as one undo step.
    pub fn move_commit(&mut self) -> bool {
        self.history.commit_capture()
    }

    /// Finish a drag by reparenting instead of moving.
    ///
    /// The drag's pin changes are discarded: the reparent applies to the
    /// pre-drag tree, so one undo returns exactly to where the drag began.
    /// When the reparent is refused, the drag is committed as a move.
    pub fn reparent_drag(&mut self, child: NodeId, new_parent: NodeId) -> bool {
        let Some(before) = self.history.take_capture() else {
            return self.reparent(child, new_parent);
        };
        match edit::reparent(&before.tree, child, new_parent) {
            Ok(next) => {
                self.history.push(before);
                self.set_tree(next);
                self.set_selected(child);
                true
            }
            Err(e) => {
                log::debug!("reparent ignored: {e}");
                self.history.push(before);
                false
            }
        }
    }

    /// Undo and redo settle a drag still in progress first.
    pub fn undo(&mut self) -> bool {
        self.history.commit_capture();
        let current = self.snapshot();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        log::debug!("undo ({} left)", self.history.undo_depth());
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.history.commit_capture();
        let current = self.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        log::debug!("redo ({} left)", self.history.redo_depth());
        self.restore(next);
        true
    }

    /// Select `id` if it is in the tree.
    pub fn select(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.set_selected(id);
        true
    }

    /// Ask the host to prompt for a new name.
    pub fn request_rename(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.emit(SessionEvent::RenameRequested(id));
        true
    }

    /// Replace the tree with an imported document.
    ///
    /// Selects the root and resets history. On error nothing changes.
    pub fn import_json(&mut self, json: &str) -> Result<(), CodecError> {
        let tree = codec::import_json(json)?;
        self.history.clear();
        let root = tree.root_id();
        self.set_tree(tree);
        self.set_selected(root);
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, CodecError> {
        codec::export_json(&self.tree)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.layout = OnceCell::new();
        self.emit(SessionEvent::Resized);
    }
}
