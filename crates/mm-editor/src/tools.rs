//! Pointer tool for canvas interactions.
//!
//! The tool translates input events into `Intent`s that the controller
//! applies to the session and camera. It owns only the gesture state.
//!
//! ## Gestures
//!
//! | Gesture | Result |
//! |---------|--------|
//! | press on node | select it, arm a drag |
//! | move past the slop | `Move` at the grab offset, every event |
//! | release | `CommitMove`, or `Reparent` onto the nearest node when Shift is held at release |
//! | press on background + move | `Pan` (not while locked) |
//! | double-click on node | select + `RequestRename` |

use crate::input::InputEvent;
use crate::viewport::Camera;
use kurbo::{Point, Vec2};
use mm_core::id::NodeId;
use mm_core::layout::{Layout, Viewport};
use mm_render::hit::{hit_test, nearest_within};

/// Screen distance a press must travel before it counts as a drag.
const DRAG_SLOP: f64 = 3.0;

/// What a gesture asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Select(NodeId),
    /// Pin `id` at a layout-space position.
    Move { id: NodeId, x: f64, y: f64 },
    CommitMove,
    Reparent { node: NodeId, target: NodeId },
    /// Screen-space pan delta.
    Pan { dx: f64, dy: f64 },
    RequestRename(NodeId),
}

/// Everything a tool may read while handling an event.
pub struct ToolContext<'a> {
    pub layout: &'a Layout,
    pub camera: &'a Camera,
    pub viewport: Viewport,
    /// Reparent search radius in screen pixels.
    pub pick_radius: f64,
}

impl ToolContext<'_> {
    fn to_layout(&self, x: f64, y: f64) -> Point {
        self.camera.screen_to_layout(Point::new(x, y), self.viewport)
    }
}

/// Trait for tools that handle input and produce intents.
pub trait Tool {
    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> Vec<Intent>;

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Pressed on a node, not moved past the slop yet.
    Armed { id: NodeId, grab: Vec2, start: Point },
    Dragging { id: NodeId, grab: Vec2 },
    Panning { last: Point },
}

// ─── Drag Tool ───────────────────────────────────────────────────────────

pub struct DragTool {
    gesture: Gesture,
}

impl Default for DragTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTool {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    /// Node being dragged, once past the slop.
    pub fn dragging(&self) -> Option<NodeId> {
        match self.gesture {
            Gesture::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl Tool for DragTool {
    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext<'_>) -> Vec<Intent> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                let screen = Point::new(x, y);
                let point = ctx.to_layout(x, y);
                match hit_test(ctx.layout, point) {
                    Some(id) => {
                        self.gesture = match ctx.layout.get(id) {
                            Some(node) if !ctx.camera.locked => Gesture::Armed {
                                id,
                                grab: node.position() - point,
                                start: screen,
                            },
                            _ => Gesture::Idle,
                        };
                        vec![Intent::Select(id)]
                    }
                    None => {
                        self.gesture = if ctx.camera.locked {
                            Gesture::Idle
                        } else {
                            Gesture::Panning { last: screen }
                        };
                        vec![]
                    }
                }
            }
            InputEvent::PointerMove { x, y, .. } => {
                let screen = Point::new(x, y);
                match self.gesture {
                    Gesture::Armed { id, grab, start } => {
                        if (screen - start).hypot() < DRAG_SLOP {
                            return vec![];
                        }
                        self.gesture = Gesture::Dragging { id, grab };
                        let p = ctx.to_layout(x, y) + grab;
                        vec![Intent::Move { id, x: p.x, y: p.y }]
                    }
                    Gesture::Dragging { id, grab } => {
                        let p = ctx.to_layout(x, y) + grab;
                        vec![Intent::Move { id, x: p.x, y: p.y }]
                    }
                    Gesture::Panning { last } => {
                        self.gesture = Gesture::Panning { last: screen };
                        let d = screen - last;
                        vec![Intent::Pan { dx: d.x, dy: d.y }]
                    }
                    Gesture::Idle => vec![],
                }
            }
            InputEvent::PointerUp { x, y, modifiers } => {
                let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
                let Gesture::Dragging { id, .. } = gesture else {
                    return vec![];
                };
                if modifiers.reparent() {
                    let radius = ctx.pick_radius / ctx.camera.zoom;
                    if let Some(target) =
                        nearest_within(ctx.layout, ctx.to_layout(x, y), radius, Some(id))
                    {
                        return vec![Intent::Reparent { node: id, target }];
                    }
                }
                vec![Intent::CommitMove]
            }
            InputEvent::DoubleClick { x, y } => {
                match hit_test(ctx.layout, ctx.to_layout(x, y)) {
                    Some(id) => vec![Intent::Select(id), Intent::RequestRename(id)],
                    None => vec![],
                }
            }
            InputEvent::Wheel { .. } | InputEvent::Key { .. } => vec![],
        }
    }

    fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }
}
