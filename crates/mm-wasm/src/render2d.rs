//! Canvas2D software renderer.
//!
//! Draws the layout to an HTML `<canvas>` via `CanvasRenderingContext2d`,
//! the same picture the Vello painter and the SVG export produce.

use kurbo::Affine;
use mm_core::id::NodeId;
use mm_core::layout::{Layout, LayoutNode, Viewport};
use mm_render::theme::{SELECTION_GAP, Theme, label_size, node_radius};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

/// Render the whole layout to a Canvas2D context.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    layout: &Layout,
    viewport: Viewport,
    transform: Affine,
    selected: Option<NodeId>,
    theme: &Theme,
) {
    // Clear canvas
    let _ = ctx.reset_transform();
    ctx.set_fill_style_str(&theme.background.to_hex());
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    let [a, b, c, d, e, f] = transform.as_coeffs();
    let _ = ctx.set_transform(a, b, c, d, e, f);

    draw_links(ctx, layout, theme);
    for node in layout.nodes() {
        draw_node(ctx, node, theme);
    }
    if let Some(node) = selected.and_then(|id| layout.get(id)) {
        draw_selection_ring(ctx, node, theme);
    }

    let _ = ctx.reset_transform();
}

// ─── Drawing primitives ─────────────────────────────────────────────────

fn draw_links(ctx: &CanvasRenderingContext2d, layout: &Layout, theme: &Theme) {
    ctx.save();
    ctx.set_global_alpha(theme.link_alpha as f64);
    ctx.set_line_cap("round");
    for link in layout.links() {
        let c = link.curve;
        ctx.begin_path();
        ctx.move_to(c.p0.x, c.p0.y);
        ctx.bezier_curve_to(c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y);
        ctx.set_stroke_style_str(&link.color.to_hex());
        ctx.set_line_width(link.width);
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &LayoutNode, theme: &Theme) {
    let r = node_radius(node.depth);

    ctx.begin_path();
    let _ = ctx.arc(node.x, node.y, r, 0.0, TAU);
    ctx.set_fill_style_str(&node.branch.color().to_hex());
    ctx.fill();

    ctx.set_stroke_style_str(&theme.node_outline.to_hex());
    ctx.set_line_width(if node.collapsed && node.has_children {
        4.0
    } else {
        2.0
    });
    ctx.stroke();

    let size = label_size(node.depth);
    ctx.set_font(&format!("{size}px Inter, system-ui, sans-serif"));
    ctx.set_text_align("center");
    ctx.set_fill_style_str(&theme.label.to_hex());
    let _ = ctx.fill_text(&node.name, node.x, node.y + r + size);
}

fn draw_selection_ring(ctx: &CanvasRenderingContext2d, node: &LayoutNode, theme: &Theme) {
    ctx.begin_path();
    let _ = ctx.arc(node.x, node.y, node_radius(node.depth) + SELECTION_GAP, 0.0, TAU);
    ctx.set_stroke_style_str(&theme.selection.to_hex());
    ctx.set_line_width(2.5);
    ctx.stroke();
}
