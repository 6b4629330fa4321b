//! WASM bridge for the mind map editor.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the `<canvas>`
//! and the DOM events; everything else (tree, layout, history, persistence,
//! gestures) lives on the Rust side.

mod render2d;
pub mod store;

use mm_core::id::NodeId;
use mm_core::layout::Viewport;
use mm_editor::controller::Controller;
use mm_editor::input::{InputEvent, Modifiers};
use mm_editor::session::{EditorConfig, SessionEvent};
use mm_editor::shortcuts::ShortcutMap;
use mm_render::svg::render_svg;
use mm_render::theme::Theme;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use store::LocalStore;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Rename prompts raised by the editor, waiting for the page.
#[derive(Default)]
struct RenameRequests {
    pending: Option<NodeId>,
    handler: Option<js_sys::Function>,
}

/// The main WASM-facing canvas controller.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct MindMapCanvas {
    controller: Controller<LocalStore>,
    rename: Rc<RefCell<RenameRequests>>,
    /// Dark mode flag — `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl MindMapCanvas {
    /// Create a canvas controller, restoring the last session from
    /// `localStorage` when there is one.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self::with_store(LocalStore::open(), width, height)
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let session = self.controller.session();
        render2d::render_scene(
            ctx,
            session.layout(),
            session.viewport(),
            self.controller.transform(),
            Some(session.selected()),
            &self.theme(),
        );
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.controller.resize(Viewport { width, height });
    }

    pub fn set_theme(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    /// Standalone SVG of the current view.
    pub fn export_svg(&self) -> String {
        let session = self.controller.session();
        render_svg(
            session.layout(),
            session.viewport(),
            self.controller.transform(),
            Some(session.selected()),
            &self.theme(),
        )
    }

    /// Resolved layout as `{"nodes":[...],"links":[...]}`, in layout
    /// coordinates plus screen coordinates for DOM overlays.
    pub fn layout_json(&self) -> String {
        let layout = self.controller.session().layout();
        let transform = self.controller.transform();
        let doc = LayoutDoc {
            nodes: layout
                .nodes()
                .iter()
                .map(|n| {
                    let screen = transform * n.position();
                    NodeEntry {
                        id: n.id.as_str(),
                        name: &n.name,
                        x: n.x,
                        y: n.y,
                        screen_x: screen.x,
                        screen_y: screen.y,
                        depth: n.depth,
                        collapsed: n.collapsed,
                        pinned: n.pin.is_some(),
                        color: n.branch.color().to_hex(),
                    }
                })
                .collect(),
            links: layout
                .links()
                .iter()
                .map(|l| LinkEntry {
                    source: l.source.as_str(),
                    target: l.target.as_str(),
                    path: l.path_data(),
                    width: l.width,
                    color: l.color.to_hex(),
                })
                .collect(),
        };
        serde_json::to_string(&doc).unwrap_or_else(|_| r#"{"nodes":[],"links":[]}"#.to_string())
    }

    // ─── Pointer and keyboard ────────────────────────────────────────────

    /// Returns `true` if the canvas needs a re-render.
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::from_pointer_down(x, y, modifiers(shift, ctrl, alt, meta));
        self.controller.handle(&event)
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::from_pointer_move(x, y, modifiers(shift, ctrl, alt, meta));
        self.controller.handle(&event)
    }

    pub fn handle_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::from_pointer_up(x, y, modifiers(shift, ctrl, alt, meta));
        self.controller.handle(&event)
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::DoubleClick { x, y })
    }

    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.controller.handle(&InputEvent::Wheel { x, y, delta_y })
    }

    /// Run a keyboard shortcut.
    ///
    /// Returns `{"changed":bool,"action":"name"}`; `action` is empty when
    /// the key has no binding and the page should let the browser have it.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let Some(action) = ShortcutMap::resolve(key, modifiers(shift, ctrl, alt, meta)) else {
            return r#"{"changed":false,"action":""}"#.to_string();
        };
        let changed = self.controller.run(action);
        serde_json::json!({ "changed": changed, "action": action.name() }).to_string()
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Add a child under the selection. Returns the new node's id, or an
    /// empty string when the selected id is not in the tree.
    pub fn add_child(&mut self) -> String {
        let session = self.controller.session_mut();
        let parent = session.selected();
        session
            .add_child(parent)
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn delete_selected(&mut self) -> bool {
        let session = self.controller.session_mut();
        let id = session.selected();
        session.delete_node(id)
    }

    pub fn rename_selected(&mut self, name: &str) -> bool {
        let session = self.controller.session_mut();
        let id = session.selected();
        session.rename_node(id, name)
    }

    /// Unknown ids are rejected without being interned.
    pub fn rename_node(&mut self, id: &str, name: &str) -> bool {
        match NodeId::lookup(id) {
            Some(id) => self.controller.session_mut().rename_node(id, name),
            None => false,
        }
    }

    pub fn toggle_collapse(&mut self) -> bool {
        let session = self.controller.session_mut();
        let id = session.selected();
        session.toggle_collapse(id)
    }

    pub fn undo(&mut self) -> bool {
        self.controller.session_mut().undo()
    }

    pub fn redo(&mut self) -> bool {
        self.controller.session_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.session().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.session().can_redo()
    }

    // ─── Selection, lock, rename prompts ─────────────────────────────────

    pub fn get_selected_id(&self) -> String {
        self.controller.session().selected().as_str().to_string()
    }

    pub fn select_by_id(&mut self, id: &str) -> bool {
        match NodeId::lookup(id) {
            Some(id) => self.controller.session_mut().select(id),
            None => false,
        }
    }

    /// Lock toggle: freezes zoom, pan and dragging.
    pub fn set_locked(&mut self, locked: bool) {
        self.controller.set_locked(locked);
    }

    pub fn is_locked(&self) -> bool {
        self.controller.is_locked()
    }

    /// Pending rename prompt, as the node id. Empty when there is none.
    /// Consumes the request.
    pub fn take_rename_request(&mut self) -> String {
        self.rename
            .borrow_mut()
            .pending
            .take()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Register `callback(id)` to be called on every rename prompt instead
    /// of queueing it for `take_rename_request`. The callback runs while the
    /// canvas is borrowed, so it must defer any call back into it.
    pub fn on_rename_request(&mut self, callback: js_sys::Function) {
        self.rename.borrow_mut().handler = Some(callback);
    }

    // ─── Import / export ─────────────────────────────────────────────────

    /// Returns `{"ok":true,"json":"..."}` or `{"ok":false,"error":"..."}`.
    pub fn export_json(&self) -> String {
        match self.controller.session().export_json() {
            Ok(json) => serde_json::json!({ "ok": true, "json": json }).to_string(),
            Err(e) => {
                log::error!("export failed: {e}");
                serde_json::json!({ "ok": false, "error": "Export failed" }).to_string()
            }
        }
    }

    /// Replace the map with an exported document. Returns
    /// `{"ok":true}` or `{"ok":false,"error":"..."}`; on error nothing changes.
    pub fn import_json(&mut self, text: &str) -> String {
        match self.controller.session_mut().import_json(text) {
            Ok(()) => r#"{"ok":true}"#.to_string(),
            Err(e) => {
                log::warn!("import rejected: {e}");
                serde_json::json!({ "ok": false, "error": "Invalid mind map file" }).to_string()
            }
        }
    }
}

impl MindMapCanvas {
    /// Build a canvas over any store. Native hosts and tests use this.
    pub fn with_store(store: LocalStore, width: f64, height: f64) -> Self {
        let mut controller = Controller::new(
            store,
            Viewport { width, height },
            EditorConfig::default(),
        );
        let rename = Rc::new(RefCell::new(RenameRequests::default()));
        let requests = Rc::clone(&rename);
        controller.session_mut().subscribe(move |event| {
            if let SessionEvent::RenameRequested(id) = *event {
                let mut requests = requests.borrow_mut();
                match &requests.handler {
                    Some(handler) => {
                        let arg = JsValue::from_str(id.as_str());
                        if let Err(e) = handler.call1(&JsValue::NULL, &arg) {
                            log::warn!("rename callback threw: {e:?}");
                        }
                    }
                    None => requests.pending = Some(id),
                }
            }
        });
        Self {
            controller,
            rename,
            dark_mode: false,
        }
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }
}

#[derive(Serialize)]
struct LayoutDoc<'a> {
    nodes: Vec<NodeEntry<'a>>,
    links: Vec<LinkEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeEntry<'a> {
    id: &'a str,
    name: &'a str,
    x: f64,
    y: f64,
    screen_x: f64,
    screen_y: f64,
    depth: usize,
    collapsed: bool,
    pinned: bool,
    color: String,
}

#[derive(Serialize)]
struct LinkEntry<'a> {
    source: &'a str,
    target: &'a str,
    path: String,
    width: f64,
    color: String,
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

/// Set up better panic messages for debugging in browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("mind map WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
