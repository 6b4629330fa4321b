//! Hit testing: point → node lookup in layout space.

use kurbo::Point;
use mm_core::id::NodeId;
use mm_core::layout::Layout;

use crate::theme::node_radius;

/// Find the topmost node whose circle contains `point`.
/// Nodes are painted in pre-order, so the last match wins.
pub fn hit_test(layout: &Layout, point: Point) -> Option<NodeId> {
    layout
        .nodes()
        .iter()
        .rev()
        .find(|n| (n.position() - point).hypot() <= node_radius(n.depth))
        .map(|n| n.id)
}

/// Find the node whose center is nearest to `point`, at most `radius` away.
/// `exclude` is skipped (the node being dragged sits under the pointer).
pub fn nearest_within(
    layout: &Layout,
    point: Point,
    radius: f64,
    exclude: Option<NodeId>,
) -> Option<NodeId> {
    let mut best: Option<(f64, NodeId)> = None;
    for node in layout.nodes() {
        if Some(node.id) == exclude {
            continue;
        }
        let d = (node.position() - point).hypot();
        if d <= radius && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, node.id));
        }
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::layout::{LayoutConfig, Viewport, radial_layout};
    use mm_core::model::{MindTree, Node};

    fn pinned_layout() -> Layout {
        let tree = MindTree::new(
            Node::new(NodeId::intern("h_root"), "Root")
                .with_child(Node::new(NodeId::intern("h_a"), "A").pinned(100.0, 0.0))
                .with_child(Node::new(NodeId::intern("h_b"), "B").pinned(130.0, 0.0)),
        );
        radial_layout(&tree, Viewport::default(), &LayoutConfig::default())
    }

    #[test]
    fn hit_test_basic() {
        let layout = pinned_layout();
        assert_eq!(
            hit_test(&layout, Point::new(2.0, 3.0)),
            Some(NodeId::intern("h_root"))
        );
        assert_eq!(
            hit_test(&layout, Point::new(105.0, 0.0)),
            Some(NodeId::intern("h_a"))
        );
        assert_eq!(hit_test(&layout, Point::new(60.0, 60.0)), None);
    }

    #[test]
    fn overlapping_circles_pick_topmost() {
        let layout = pinned_layout();
        // Both A and B circles (radius 18) cover x = 115.
        assert_eq!(
            hit_test(&layout, Point::new(115.0, 0.0)),
            Some(NodeId::intern("h_b"))
        );
    }

    #[test]
    fn nearest_respects_radius_and_exclusion() {
        let layout = pinned_layout();
        let p = Point::new(110.0, 0.0);
        assert_eq!(
            nearest_within(&layout, p, 60.0, None),
            Some(NodeId::intern("h_a"))
        );
        assert_eq!(
            nearest_within(&layout, p, 60.0, Some(NodeId::intern("h_a"))),
            Some(NodeId::intern("h_b"))
        );
        assert_eq!(nearest_within(&layout, Point::new(400.0, 400.0), 60.0, None), None);
    }
}
