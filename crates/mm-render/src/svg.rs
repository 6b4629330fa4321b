//! Standalone SVG document of a layout, used for picture export.
//!
//! The document is sized to the viewport, fills it with the theme
//! background and draws the layout through the camera transform, so the
//! export matches what is on screen.

use kurbo::Affine;
use mm_core::id::NodeId;
use mm_core::layout::{Layout, Viewport};
use std::fmt::Write;

use crate::theme::{SELECTION_GAP, Theme, label_size, node_radius};

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_svg(
    layout: &Layout,
    viewport: Viewport,
    transform: Affine,
    selected: Option<NodeId>,
    theme: &Theme,
) -> String {
    let (w, h) = (viewport.width, viewport.height);
    let [a, b, c, d, e, f] = transform.as_coeffs();

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    svg.push_str("<style>\n");
    svg.push_str("  text { font-family: Inter, system-ui, sans-serif; }\n");
    svg.push_str("</style>\n");
    let _ = writeln!(
        svg,
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\" />",
        theme.background.to_hex()
    );
    let _ = writeln!(svg, "<g transform=\"matrix({a} {b} {c} {d} {e} {f})\">");

    for link in layout.links() {
        let _ = writeln!(
            svg,
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" />",
            link.path_data(),
            link.color.to_hex(),
            theme.link_alpha,
            link.width
        );
    }

    let outline = theme.node_outline.to_hex();
    for node in layout.nodes() {
        let r = node_radius(node.depth);
        let outline_width = if node.collapsed && node.has_children {
            4.0
        } else {
            2.0
        };
        let _ = writeln!(
            svg,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{r}\" fill=\"{}\" stroke=\"{outline}\" stroke-width=\"{outline_width}\" />",
            node.x,
            node.y,
            node.branch.color().to_hex()
        );
        let size = label_size(node.depth);
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{size}\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
            node.x,
            node.y + r + size,
            theme.label.to_hex(),
            escape_xml(&node.name)
        );
    }

    if let Some(node) = selected.and_then(|id| layout.get(id)) {
        let _ = writeln!(
            svg,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2.5\" />",
            node.x,
            node.y,
            node_radius(node.depth) + SELECTION_GAP,
            theme.selection.to_hex()
        );
    }

    svg.push_str("</g>\n</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::model::{MindTree, Node};
    use mm_core::{LayoutConfig, radial_layout};
    use pretty_assertions::assert_eq;

    fn sample() -> (MindTree, Layout) {
        let tree = MindTree::new(
            Node::new(NodeId::intern("s_root"), "Plans & <Ideas>")
                .with_child(Node::new(NodeId::intern("s_a"), "A"))
                .with_child(Node::new(NodeId::intern("s_b"), "B")),
        );
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        (tree, layout)
    }

    #[test]
    fn escape_covers_markup() {
        assert_eq!(
            escape_xml(r#"a<b>&"c"'d'"#),
            "a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;"
        );
    }

    #[test]
    fn document_structure() {
        let (_, layout) = sample();
        let svg = render_svg(
            &layout,
            Viewport::default(),
            Affine::translate((400.0, 300.0)),
            None,
            &Theme::light(),
        );
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("fill=\"#F5F5F7\""));
        assert!(svg.contains("matrix(1 0 0 1 400 300)"));
        assert_eq!(svg.matches("<path ").count(), 2);
        assert_eq!(svg.matches("<circle ").count(), 3);
        assert!(svg.contains("Plans &amp; &lt;Ideas&gt;"));
    }

    #[test]
    fn selection_ring_is_drawn() {
        let (tree, layout) = sample();
        let svg = render_svg(
            &layout,
            Viewport::default(),
            Affine::IDENTITY,
            Some(tree.root_id()),
            &Theme::light(),
        );
        assert_eq!(svg.matches("<circle ").count(), 4);
        assert!(svg.contains("stroke=\"#0A84FF\""));
    }
}
