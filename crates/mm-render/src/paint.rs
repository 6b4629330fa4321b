//! Layout → Vello drawing commands.
//!
//! Emits links first, then node circles in pre-order so children paint over
//! their parents, then the selection ring on top.

use kurbo::{Affine, Cap, Circle, Stroke as KurboStroke};
use mm_core::id::NodeId;
use mm_core::layout::{Layout, LayoutNode};
use mm_core::model::Color as ModelColor;
use peniko::{Color, Fill};
use vello::Scene;

use crate::theme::{SELECTION_GAP, Theme, node_radius};

/// Paint the whole layout to a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`. `transform` maps
/// layout space to the surface (see the editor camera).
pub fn paint_scene(
    scene: &mut Scene,
    layout: &Layout,
    transform: Affine,
    selected: Option<NodeId>,
    theme: &Theme,
) {
    for link in layout.links() {
        let stroke = KurboStroke::new(link.width)
            .with_start_cap(Cap::Round)
            .with_end_cap(Cap::Round);
        let color = to_peniko(link.color, theme.link_alpha);
        scene.stroke(&stroke, transform, color, None, &link.path());
    }

    for node in layout.nodes() {
        paint_node(scene, node, transform, theme);
    }

    if let Some(node) = selected.and_then(|id| layout.get(id)) {
        let ring = Circle::new(node.position(), node_radius(node.depth) + SELECTION_GAP);
        let color = to_peniko(theme.selection, 1.0);
        scene.stroke(&KurboStroke::new(2.5), transform, color, None, &ring);
    }
}

fn paint_node(scene: &mut Scene, node: &LayoutNode, transform: Affine, theme: &Theme) {
    let circle = Circle::new(node.position(), node_radius(node.depth));
    let fill = to_peniko(node.branch.color(), 1.0);
    scene.fill(Fill::NonZero, transform, fill, None, &circle);

    // Collapsed nodes with hidden children get a heavier outline.
    let outline_width = if node.collapsed && node.has_children {
        4.0
    } else {
        2.0
    };
    let outline = to_peniko(theme.node_outline, 1.0);
    scene.stroke(
        &KurboStroke::new(outline_width),
        transform,
        outline,
        None,
        &circle,
    );

    log::trace!(
        "LABEL {} {:?} at ({:.1}, {:.1})",
        node.id,
        node.name,
        node.x,
        node.y
    );
    // Glyph runs need a font context; hosts draw labels on top.
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn to_peniko(c: ModelColor, alpha: f32) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    Color::from_rgba8(r, g, b, (a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::model::default_tree;
    use mm_core::{LayoutConfig, Viewport, radial_layout};

    #[test]
    fn alpha_is_applied() {
        let c = to_peniko(ModelColor::rgb8(10, 20, 30), 0.5);
        assert_eq!(c.components, Color::from_rgba8(10, 20, 30, 127).components);
    }

    #[test]
    fn paints_without_panicking() {
        let tree = default_tree();
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        let mut scene = Scene::new();
        paint_scene(
            &mut scene,
            &layout,
            Affine::translate((400.0, 300.0)),
            Some(tree.root_id()),
            &Theme::dark(),
        );
    }
}
