//! Canvas controller: routes input to the tool, camera and session.
//!
//! Hosts (the WASM bridge, tests) feed `InputEvent`s in and re-render when
//! `handle` reports a visual change.

use crate::input::{InputEvent, Modifiers};
use crate::session::{EditorConfig, EditorSession};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::SnapshotStore;
use crate::tools::{DragTool, Intent, Tool, ToolContext};
use crate::viewport::Camera;
use kurbo::{Affine, Point, Vec2};
use mm_core::layout::Viewport;

pub struct Controller<S: SnapshotStore> {
    session: EditorSession<S>,
    camera: Camera,
    tool: DragTool,
}

impl<S: SnapshotStore> Controller<S> {
    pub fn new(store: S, viewport: Viewport, config: EditorConfig) -> Self {
        let camera = Camera::new(config.min_zoom, config.max_zoom);
        Self {
            session: EditorSession::init(store, viewport, config),
            camera,
            tool: DragTool::new(),
        }
    }

    pub fn session(&self) -> &EditorSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession<S> {
        &mut self.session
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Layout → screen transform for painters.
    pub fn transform(&self) -> Affine {
        self.camera.transform(self.session.viewport())
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.camera.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.camera.locked
    }

    pub fn is_dragging(&self) -> bool {
        self.tool.is_active()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.session.resize(viewport);
    }

    pub fn teardown(self) -> S {
        self.session.teardown()
    }

    /// Handle one input event. Returns `true` when a re-render is needed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Wheel { x, y, delta_y } => self.zoom(*x, *y, *delta_y),
            InputEvent::Key { key, modifiers } => self.handle_key(key, *modifiers).is_some(),
            _ => {
                let viewport = self.session.viewport();
                let ctx = ToolContext {
                    layout: self.session.layout(),
                    camera: &self.camera,
                    viewport,
                    pick_radius: self.session.config().pick_radius,
                };
                let intents = self.tool.handle(event, &ctx);
                let mut changed = false;
                for intent in intents {
                    changed |= self.apply(intent);
                }
                changed
            }
        }
    }

    /// Resolve and run a keyboard shortcut. Returns the action if one ran.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(key, modifiers)?;
        self.run(action);
        Some(action)
    }

    /// Run a shortcut action against the current selection.
    pub fn run(&mut self, action: ShortcutAction) -> bool {
        let selected = self.session.selected();
        match action {
            ShortcutAction::AddChild => self.session.add_child(selected).is_some(),
            ShortcutAction::Delete => self.session.delete_node(selected),
            ShortcutAction::Rename => self.session.request_rename(selected),
            ShortcutAction::ToggleCollapse => self.session.toggle_collapse(selected),
            ShortcutAction::Undo => self.session.undo(),
            ShortcutAction::Redo => self.session.redo(),
            ShortcutAction::ResetView => {
                self.camera.reset();
                true
            }
        }
    }

    fn zoom(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let step = self.session.config().wheel_zoom_step;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        let viewport = self.session.viewport();
        self.camera.zoom_at(Point::new(x, y), factor, viewport)
    }

    fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Select(id) => self.session.select(id),
            Intent::Move { id, x, y } => self.session.move_node(id, x, y),
            Intent::CommitMove => self.session.move_commit(),
            Intent::Reparent { node, target } => self.session.reparent_drag(node, target),
            Intent::Pan { dx, dy } => self.camera.pan_by(Vec2::new(dx, dy)),
            Intent::RequestRename(id) => self.session.request_rename(id),
        }
    }
}
