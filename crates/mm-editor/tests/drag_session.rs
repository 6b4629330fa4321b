//! Integration tests: pointer gestures through the controller (mm-editor).
//!
//! Screen coordinates: the root sits at the viewport center (400, 300)
//! until the camera moves.

use mm_core::id::NodeId;
use mm_core::layout::Viewport;
use mm_editor::controller::Controller;
use mm_editor::input::{InputEvent, Modifiers};
use mm_editor::session::{EditorConfig, SessionEvent};
use mm_editor::store::{MemoryStore, TREE_KEY};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

/// Root with two pinned children: A at layout (100, 0), B at (-100, 0).
const TREE: &str = r#"{
  "id": "d_root", "name": "Root",
  "children": [
    { "id": "d_a", "name": "A", "px": 100, "py": 0, "children": [] },
    { "id": "d_b", "name": "B", "px": -100, "py": 0, "children": [] }
  ]
}"#;

fn make_controller() -> Controller<MemoryStore> {
    Controller::new(
        MemoryStore::new().with(TREE_KEY, TREE),
        VIEWPORT,
        EditorConfig::default(),
    )
}

fn down(c: &mut Controller<MemoryStore>, x: f64, y: f64) -> bool {
    c.handle(&InputEvent::from_pointer_down(x, y, Modifiers::NONE))
}

fn drag_to(c: &mut Controller<MemoryStore>, x: f64, y: f64) -> bool {
    c.handle(&InputEvent::from_pointer_move(x, y, Modifiers::NONE))
}

fn up(c: &mut Controller<MemoryStore>, x: f64, y: f64, modifiers: Modifiers) -> bool {
    c.handle(&InputEvent::from_pointer_up(x, y, modifiers))
}

fn pin_of(c: &Controller<MemoryStore>, id: &str) -> Option<(f64, f64)> {
    c.session()
        .node(NodeId::intern(id))
        .and_then(|n| n.pin)
        .map(|p| (p.x, p.y))
}

// ─── Move ───────────────────────────────────────────────────────────────

#[test]
fn many_moves_collapse_into_one_undo_step() {
    let mut c = make_controller();
    let before = c.session().snapshot();

    assert!(down(&mut c, 500.0, 300.0));
    for step in 1..=20 {
        drag_to(&mut c, 500.0 + step as f64 * 5.0, 300.0);
    }
    // Nothing recorded until release.
    assert!(!c.session().can_undo());
    assert_eq!(pin_of(&c, "d_a"), Some((200.0, 0.0)));

    assert!(up(&mut c, 600.0, 300.0, Modifiers::NONE));
    assert_eq!(c.session().undo_depth(), 1);

    // The single entry is the pre-drag state (selection included).
    let mut expected = before;
    expected.selected = NodeId::intern("d_a");
    c.session_mut().undo();
    assert_eq!(c.session().tree(), &expected.tree);
    assert_eq!(pin_of(&c, "d_a"), Some((100.0, 0.0)));
}

#[test]
fn click_without_drag_records_nothing() {
    let mut c = make_controller();
    down(&mut c, 500.0, 300.0);
    up(&mut c, 500.0, 300.0, Modifiers::NONE);
    assert_eq!(c.session().selected(), NodeId::intern("d_a"));
    assert!(!c.session().can_undo());
}

// ─── Reparent ───────────────────────────────────────────────────────────

#[test]
fn shift_at_release_reparents_onto_nearest_node() {
    let mut c = make_controller();
    let a = NodeId::intern("d_a");
    let b = NodeId::intern("d_b");
    let before = c.session().tree().clone();

    down(&mut c, 500.0, 300.0);
    // Drag A over to B (screen 300, 300), Shift only pressed at the end.
    drag_to(&mut c, 400.0, 310.0);
    drag_to(&mut c, 310.0, 300.0);
    assert!(up(&mut c, 310.0, 300.0, Modifiers::SHIFT));

    let tree = c.session().tree();
    assert_eq!(tree.parent_of(a).map(|n| n.id), Some(b));
    assert_eq!(c.session().selected(), a);
    // Drag pins are dropped; one undo returns to the pre-drag tree.
    assert_eq!(pin_of(&c, "d_a"), Some((100.0, 0.0)));
    assert_eq!(c.session().undo_depth(), 1);
    c.session_mut().undo();
    assert_eq!(c.session().tree(), &before);
}

#[test]
fn refused_reparent_keeps_the_drag_as_a_move() {
    let mut c = make_controller();
    let a = NodeId::intern("d_a");
    let root = NodeId::intern("d_root");

    down(&mut c, 500.0, 300.0);
    drag_to(&mut c, 460.0, 300.0);
    drag_to(&mut c, 420.0, 300.0);
    // Nearest node is A's own parent: the reparent is refused.
    up(&mut c, 420.0, 300.0, Modifiers::SHIFT);

    assert_eq!(c.session().tree().parent_of(a).map(|n| n.id), Some(root));
    assert_eq!(pin_of(&c, "d_a"), Some((20.0, 0.0)));
    assert_eq!(c.session().undo_depth(), 1);

    c.session_mut().undo();
    assert_eq!(pin_of(&c, "d_a"), Some((100.0, 0.0)));
    assert!(!c.session().can_undo());
}

#[test]
fn reparent_radius_scales_with_zoom() {
    let mut c = make_controller();
    let a = NodeId::intern("d_a");
    let b = NodeId::intern("d_b");

    // Seven notches out, anchored on the root: zoom ≈ 0.513.
    for _ in 0..7 {
        c.handle(&InputEvent::Wheel {
            x: 400.0,
            y: 300.0,
            delta_y: 1.0,
        });
    }
    let z = c.camera().zoom;
    assert!(z < 0.52 && z > 0.51);

    // Release 50 screen px below B: 97 layout units away, inside 60 / z
    // but outside a fixed 60.
    let (bx, by) = (400.0 - 100.0 * z, 300.0);
    down(&mut c, 400.0 + 100.0 * z, 300.0);
    drag_to(&mut c, 400.0 + 100.0 * z, 330.0);
    drag_to(&mut c, bx, by + 50.0);
    up(&mut c, bx, by + 50.0, Modifiers::SHIFT);

    assert_eq!(c.session().tree().parent_of(a).map(|n| n.id), Some(b));
}

// ─── Camera ─────────────────────────────────────────────────────────────

#[test]
fn background_drag_pans_and_lock_blocks_it() {
    let mut c = make_controller();
    down(&mut c, 20.0, 20.0);
    assert!(drag_to(&mut c, 50.0, 40.0));
    up(&mut c, 50.0, 40.0, Modifiers::NONE);
    assert_eq!((c.camera().pan.x, c.camera().pan.y), (30.0, 20.0));

    c.set_locked(true);
    down(&mut c, 20.0, 20.0);
    assert!(!drag_to(&mut c, 80.0, 80.0));
    assert_eq!((c.camera().pan.x, c.camera().pan.y), (30.0, 20.0));
    assert!(!c.handle(&InputEvent::Wheel {
        x: 0.0,
        y: 0.0,
        delta_y: -1.0
    }));
}

#[test]
fn locked_canvas_still_selects_and_edits() {
    let mut c = make_controller();
    c.set_locked(true);
    down(&mut c, 500.0, 300.0);
    drag_to(&mut c, 560.0, 300.0);
    up(&mut c, 560.0, 300.0, Modifiers::NONE);
    assert_eq!(c.session().selected(), NodeId::intern("d_a"));
    assert_eq!(pin_of(&c, "d_a"), Some((100.0, 0.0)));

    let key = InputEvent::Key {
        key: "Enter".into(),
        modifiers: Modifiers::NONE,
    };
    assert!(c.handle(&key));
    assert_eq!(c.session().node(NodeId::intern("d_a")).unwrap().children.len(), 1);
}

// ─── Keyboard and rename ────────────────────────────────────────────────

#[test]
fn keyboard_edits_follow_selection() {
    let mut c = make_controller();
    let root = NodeId::intern("d_root");
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    // Delete on the root is blocked.
    c.handle_key("Delete", Modifiers::NONE);
    assert_eq!(c.session().node_count(), 3);

    c.session_mut().select(NodeId::intern("d_b"));
    c.handle_key("Backspace", Modifiers::NONE);
    assert_eq!(c.session().node_count(), 2);
    assert_eq!(c.session().selected(), root);

    c.handle_key("z", ctrl);
    assert_eq!(c.session().node_count(), 3);
    c.handle_key("y", ctrl);
    assert_eq!(c.session().node_count(), 2);
}

#[test]
fn double_click_and_f2_request_rename() {
    let mut c = make_controller();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    c.session_mut().subscribe(move |e| {
        if let SessionEvent::RenameRequested(id) = e {
            sink.borrow_mut().push(*id);
        }
    });

    c.handle(&InputEvent::DoubleClick { x: 300.0, y: 300.0 });
    c.handle_key("F2", Modifiers::NONE);
    let b = NodeId::intern("d_b");
    assert_eq!(*seen.borrow(), vec![b, b]);
}
