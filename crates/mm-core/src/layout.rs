//! Radial layout.
//!
//! Maps a `MindTree` plus the viewport size to positioned `LayoutNode`s and
//! connector `Link`s. The result is a pure function of its inputs: collapsed
//! subtrees are skipped, manual pins override the computed position, and the
//! automatic position is reported either way.

use crate::geometry::{Branch, Link, connector, stroke_width};
use crate::id::NodeId;
use crate::model::{MindTree, Node};
use crate::tidy::{Separation, tidy_tree};
use kurbo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Tuning knobs for `radial_layout`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Smallest outer radius, whatever the viewport. Default: **260**.
    pub min_radius: f64,
    /// Outer radius as a share of the viewport's short side. Default: **0.42**.
    pub radius_factor: f64,
    /// Angular spacing between neighbours. Default: 1 sibling / 2 otherwise.
    pub separation: Separation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_radius: 260.0,
            radius_factor: 0.42,
            separation: Separation::default(),
        }
    }
}

impl LayoutConfig {
    /// Radius assigned to the deepest visible level.
    pub fn outer_radius(&self, viewport: Viewport) -> f64 {
        (self.radius_factor * viewport.width.min(viewport.height)).max(self.min_radius)
    }
}

/// A positioned node. Recomputed on every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub name: String,
    pub collapsed: bool,
    pub pin: Option<Point>,
    pub depth: usize,
    /// Final render position: the pin when present, else `auto_x`.
    pub x: f64,
    pub y: f64,
    /// Where the radial layout would put the node.
    pub auto_x: f64,
    pub auto_y: f64,
    /// Polar angle in radians, `[0, 2π]`, 0 pointing up.
    pub angle: f64,
    pub radius: f64,
    pub parent: Option<NodeId>,
    /// Whether the model node has children (collapsed or not).
    pub has_children: bool,
    pub branch: Branch,
}

impl LayoutNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Output of a layout pass.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    nodes: Vec<LayoutNode>,
    links: Vec<Link>,
    index: HashMap<NodeId, usize>,
}

impl Layout {
    /// Visible nodes in pre-order (root first).
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// One link per visible parent→child edge, in child pre-order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }
}

/// One vertex of the visible hierarchy.
struct Visible<'a> {
    node: &'a Node,
    branch: Branch,
}

/// Build the visible hierarchy: collapsed nodes report no children.
/// Siblings are inserted together, so `NodeIndex` order matches child order.
fn hierarchy(tree: &MindTree) -> (DiGraph<Visible<'_>, ()>, NodeIndex) {
    let mut graph = DiGraph::new();
    let root = graph.add_node(Visible {
        node: tree.root(),
        branch: Branch::Neutral,
    });

    let mut stack: Vec<NodeIndex> = vec![root];
    while let Some(parent_idx) = stack.pop() {
        let parent = graph[parent_idx].node;
        let parent_branch = graph[parent_idx].branch;
        let mut added = Vec::with_capacity(parent.visible_children().len());
        for (i, child) in parent.visible_children().iter().enumerate() {
            let branch = match parent_branch {
                Branch::Neutral => Branch::Top(i),
                inherited => inherited,
            };
            added.push((child.as_ref(), branch));
        }
        let mut children = Vec::with_capacity(added.len());
        for (node, branch) in added {
            let idx = graph.add_node(Visible { node, branch });
            graph.add_edge(parent_idx, idx, ());
            children.push(idx);
        }
        stack.extend(children.into_iter().rev());
    }
    (graph, root)
}

/// Lay out `tree` radially for the given viewport.
pub fn radial_layout(tree: &MindTree, viewport: Viewport, config: &LayoutConfig) -> Layout {
    let (graph, root) = hierarchy(tree);
    let radius = config.outer_radius(viewport);
    let points = tidy_tree(&graph, root, config.separation, TAU, radius);

    // Walk in pre-order so output order is root first, children in order.
    let mut nodes = Vec::with_capacity(graph.node_count());
    let mut index = HashMap::with_capacity(graph.node_count());
    let mut links = Vec::with_capacity(graph.node_count().saturating_sub(1));
    let mut position_of: HashMap<NodeIndex, Point> = HashMap::new();

    let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = vec![(root, None)];
    while let Some((idx, parent_idx)) = stack.pop() {
        let visible = &graph[idx];
        let node = visible.node;
        let tp = points[idx.index()];

        let angle = tp.x;
        let r = tp.y;
        let auto = Point::new(r * (angle - FRAC_PI_2).cos(), r * (angle - FRAC_PI_2).sin());
        let resolved = node.pin.unwrap_or(auto);
        position_of.insert(idx, resolved);

        let parent_id = parent_idx.map(|p| graph[p].node.id);
        if let Some(p) = parent_idx
            && let Some(&from) = position_of.get(&p)
        {
            links.push(Link {
                source: graph[p].node.id,
                target: node.id,
                curve: connector(from, resolved),
                width: stroke_width(tp.depth),
                color: visible.branch.color(),
            });
        }

        index.insert(node.id, nodes.len());
        nodes.push(LayoutNode {
            id: node.id,
            name: node.name.clone(),
            collapsed: node.collapsed,
            pin: node.pin,
            depth: tp.depth,
            x: resolved.x,
            y: resolved.y,
            auto_x: auto.x,
            auto_y: auto.y,
            angle,
            radius: r,
            parent: parent_id,
            has_children: node.has_children(),
            branch: visible.branch,
        });

        let mut children: Vec<NodeIndex> = graph.neighbors(idx).collect();
        children.sort();
        stack.extend(children.into_iter().rev().map(|c| (c, Some(idx))));
    }

    log::trace!(
        "radial layout: {} nodes, {} links, outer radius {radius}",
        nodes.len(),
        links.len()
    );
    Layout {
        nodes,
        links,
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    #[test]
    fn outer_radius_has_floor() {
        let cfg = LayoutConfig::default();
        let small = Viewport {
            width: 320.0,
            height: 480.0,
        };
        assert_eq!(cfg.outer_radius(small), 260.0);
        let big = Viewport {
            width: 2000.0,
            height: 1000.0,
        };
        assert!((cfg.outer_radius(big) - 420.0).abs() < 1e-9);
    }

    #[test]
    fn root_sits_at_origin() {
        let tree = MindTree::new(Node::new(id("l_root"), "Solo"));
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        let root = layout.root().unwrap();
        assert!(root.x.abs() < 1e-9 && root.y.abs() < 1e-9);
        assert!(layout.links().is_empty());
    }

    #[test]
    fn collapsed_subtree_is_hidden() {
        let mut inner = Node::new(id("l_a"), "A").with_child(Node::new(id("l_a1"), "A1"));
        inner.collapsed = true;
        let tree = MindTree::new(Node::new(id("l_r"), "R").with_child(inner));
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());

        assert_eq!(layout.nodes().len(), 2);
        assert!(layout.get(id("l_a1")).is_none());
        assert!(layout.get(id("l_a")).unwrap().has_children);
        assert_eq!(layout.links().len(), 1);
    }

    #[test]
    fn branches_follow_top_level_children() {
        let tree = MindTree::new(
            Node::new(id("l_br"), "R")
                .with_child(Node::new(id("l_b0"), "B0").with_child(Node::new(id("l_b00"), "B00")))
                .with_child(Node::new(id("l_b1"), "B1")),
        );
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        assert_eq!(layout.get(id("l_br")).unwrap().branch, Branch::Neutral);
        assert_eq!(layout.get(id("l_b0")).unwrap().branch, Branch::Top(0));
        assert_eq!(layout.get(id("l_b00")).unwrap().branch, Branch::Top(0));
        assert_eq!(layout.get(id("l_b1")).unwrap().branch, Branch::Top(1));
    }

    #[test]
    fn pin_overrides_but_auto_is_kept() {
        let tree = MindTree::new(
            Node::new(id("l_pr"), "R").with_child(Node::new(id("l_p"), "P").pinned(10.0, 20.0)),
        );
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        let p = layout.get(id("l_p")).unwrap();
        assert_eq!((p.x, p.y), (10.0, 20.0));
        let r = (p.auto_x * p.auto_x + p.auto_y * p.auto_y).sqrt();
        assert!((r - 260.0).abs() < 1e-6);
        // The link ends at the pinned position.
        assert_eq!(layout.links()[0].curve.p3, Point::new(10.0, 20.0));
    }

    #[test]
    fn preorder_output() {
        let tree = MindTree::new(
            Node::new(id("l_o"), "R")
                .with_child(Node::new(id("l_o1"), "1").with_child(Node::new(id("l_o11"), "11")))
                .with_child(Node::new(id("l_o2"), "2")),
        );
        let layout = radial_layout(&tree, Viewport::default(), &LayoutConfig::default());
        let names: Vec<&str> = layout.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["R", "1", "11", "2"]);
        assert_eq!(layout.get(id("l_o11")).unwrap().parent, Some(id("l_o1")));
        assert_eq!(layout.get(id("l_o11")).unwrap().depth, 2);
    }
}
