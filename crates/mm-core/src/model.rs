//! Core tree data model for mind maps.
//!
//! A mind map is a single-rooted tree of labeled nodes. Trees are persistent:
//! nodes are shared through `Arc`, and an edit rebuilds only the path from the
//! root to the touched node, so every earlier `MindTree` value stays intact and
//! can be kept as an undo snapshot for the cost of a pointer copy.

use crate::id::NodeId;
use kurbo::Point;
use smallvec::SmallVec;
use std::sync::Arc;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb8(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb8(r, g, b))
            }
            _ => None,
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Emit as `#RRGGBB` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Fallback label used when a rename trims down to nothing.
pub const FALLBACK_NAME: &str = "Node";

/// Label given to nodes created by `add_child`.
pub const NEW_NODE_NAME: &str = "New Node";

/// A single node in the mind map.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable identity, assigned once at creation.
    pub id: NodeId,

    /// Display label.
    pub name: String,

    /// Ordered children. Order drives layout angle and branch color.
    pub children: Vec<Arc<Node>>,

    /// Hide the subtree from layout (descendants are kept in the model).
    pub collapsed: bool,

    /// Manual position override in layout space (`px`/`py`).
    pub pin: Option<Point>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            collapsed: false,
            pin: None,
        }
    }

    /// Builder helper: append a child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Builder helper: set the manual position.
    #[must_use]
    pub fn pinned(mut self, x: f64, y: f64) -> Self {
        self.pin = Some(Point::new(x, y));
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children that take part in layout: none while collapsed.
    pub fn visible_children(&self) -> &[Arc<Node>] {
        if self.collapsed { &[] } else { &self.children }
    }
}

/// Child-index path from the root to a node. Empty for the root itself.
pub type NodePath = SmallVec<[usize; 8]>;

// ─── Tree ────────────────────────────────────────────────────────────────

/// An immutable mind map tree. Cloning is O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct MindTree {
    root: Arc<Node>,
}

impl MindTree {
    #[must_use]
    pub fn new(root: Node) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub(crate) fn from_arc(root: Arc<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn root_arc(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id
    }

    /// Look up a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Child-index path from the root to `id`.
    pub fn path_to(&self, id: NodeId) -> Option<NodePath> {
        fn walk(node: &Node, id: NodeId, path: &mut NodePath) -> bool {
            if node.id == id {
                return true;
            }
            for (i, child) in node.children.iter().enumerate() {
                path.push(i);
                if walk(child, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = NodePath::new();
        walk(&self.root, id, &mut path).then_some(path)
    }

    /// Resolve a path produced by `path_to`.
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node: &Node = &self.root;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// The parent of `id`, or `None` for the root and unknown IDs.
    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        let path = self.path_to(id)?;
        let (_, parent_path) = path.split_last()?;
        self.node_at(parent_path)
    }

    /// Depth of `id` (root = 0).
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.path_to(id).map(|p| p.len())
    }

    /// Check if `descendant` lies strictly below `ancestor`.
    /// Walks the subtree rooted at `ancestor`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        if ancestor == descendant {
            return false;
        }
        match self.get(ancestor) {
            Some(node) => subtree_contains(node, descendant),
            None => false,
        }
    }

    /// Pre-order traversal (parent before children, children in order).
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![&self.root],
        }
    }

    /// Total number of nodes, collapsed subtrees included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

/// Whether `id` occurs anywhere below `node`.
pub fn subtree_contains(node: &Node, id: NodeId) -> bool {
    node.children
        .iter()
        .any(|c| c.id == id || subtree_contains(c, id))
}

/// Pre-order iterator over a `MindTree`.
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| c.as_ref()));
        Some(node)
    }
}

/// The tree shown on first launch or when stored state is unusable.
pub fn default_tree() -> MindTree {
    MindTree::new(
        Node::new(NodeId::fresh(), "Central Topic")
            .with_child(Node::new(NodeId::fresh(), "Ideas"))
            .with_child(Node::new(NodeId::fresh(), "Tasks"))
            .with_child(Node::new(NodeId::fresh(), "Notes")),
    )
}
