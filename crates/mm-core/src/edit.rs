//! Pure structural edits on `MindTree`.
//!
//! Every edit takes a tree by reference and returns a brand new tree; the
//! input is never touched. Only the nodes on the root→target path are copied,
//! untouched subtrees are shared with the input by `Arc`.
//!
//! Invalid edits come back as an `EditRejection`. Callers that want the
//! "silently ignore" behavior of the editor simply drop the error.

use crate::id::NodeId;
use crate::model::{FALLBACK_NAME, MindTree, NEW_NODE_NAME, Node, subtree_contains};
use kurbo::Point;
use std::sync::Arc;

/// Why an edit was refused. The tree is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditRejection {
    #[error("node `{0}` is not in the tree")]
    UnknownNode(NodeId),
    #[error("the root node cannot be deleted or reparented")]
    RootProtected,
    #[error("node `{0}` cannot become its own parent")]
    SelfParent(NodeId),
    #[error("`{target}` is inside the subtree of `{node}`")]
    WouldCycle { node: NodeId, target: NodeId },
    #[error("`{node}` is already a child of `{parent}`")]
    AlreadyChild { node: NodeId, parent: NodeId },
}

pub type EditResult<T = MindTree> = Result<T, EditRejection>;

/// Rebuild the path to `path`, applying `f` to a copy of the node found there.
fn update_at(node: &Arc<Node>, path: &[usize], f: &mut impl FnMut(&mut Node)) -> Arc<Node> {
    let mut copy = Node::clone(node);
    match path.split_first() {
        None => f(&mut copy),
        Some((&i, rest)) => copy.children[i] = update_at(&node.children[i], rest, f),
    }
    Arc::new(copy)
}

/// Apply `f` to a copy of node `id` and return the resulting tree.
pub fn update_node(tree: &MindTree, id: NodeId, mut f: impl FnMut(&mut Node)) -> EditResult {
    let path = tree.path_to(id).ok_or(EditRejection::UnknownNode(id))?;
    Ok(MindTree::from_arc(update_at(tree.root_arc(), &path, &mut f)))
}

/// Append a `"New Node"` leaf under `parent`. Returns the new tree and the
/// child's freshly generated ID.
pub fn add_child(tree: &MindTree, parent: NodeId) -> EditResult<(MindTree, NodeId)> {
    let child_id = NodeId::fresh();
    let next = update_node(tree, parent, |node| {
        node.children
            .push(Arc::new(Node::new(child_id, NEW_NODE_NAME)));
    })?;
    Ok((next, child_id))
}

/// Remove the subtree rooted at `id`.
pub fn delete_node(tree: &MindTree, id: NodeId) -> EditResult {
    if id == tree.root_id() {
        return Err(EditRejection::RootProtected);
    }
    let path = tree.path_to(id).ok_or(EditRejection::UnknownNode(id))?;
    detach(tree, &path).map(|(next, _)| next)
}

/// Set the label to the trimmed input, or `"Node"` when nothing is left.
pub fn rename_node(tree: &MindTree, id: NodeId, name: &str) -> EditResult {
    let trimmed = name.trim();
    let label = if trimmed.is_empty() {
        FALLBACK_NAME
    } else {
        trimmed
    };
    update_node(tree, id, |node| node.name = label.to_string())
}

/// Flip the `collapsed` flag of a single node.
pub fn toggle_collapse(tree: &MindTree, id: NodeId) -> EditResult {
    update_node(tree, id, |node| node.collapsed = !node.collapsed)
}

/// Pin a node at `(x, y)` in layout space.
pub fn move_node(tree: &MindTree, id: NodeId, x: f64, y: f64) -> EditResult {
    update_node(tree, id, |node| node.pin = Some(Point::new(x, y)))
}

/// Move the subtree rooted at `child` to the end of `new_parent`'s children.
///
/// Reparenting onto the current parent is refused so sibling order is kept.
pub fn reparent(tree: &MindTree, child: NodeId, new_parent: NodeId) -> EditResult {
    if child == tree.root_id() {
        return Err(EditRejection::RootProtected);
    }
    if child == new_parent {
        return Err(EditRejection::SelfParent(child));
    }
    let child_path = tree.path_to(child).ok_or(EditRejection::UnknownNode(child))?;
    if !tree.contains(new_parent) {
        return Err(EditRejection::UnknownNode(new_parent));
    }
    if let Some(node) = tree.node_at(&child_path)
        && subtree_contains(node, new_parent)
    {
        return Err(EditRejection::WouldCycle {
            node: child,
            target: new_parent,
        });
    }
    if let Some(parent) = tree.parent_of(child)
        && parent.id == new_parent
    {
        return Err(EditRejection::AlreadyChild {
            node: child,
            parent: new_parent,
        });
    }

    let (detached, subtree) = detach(tree, &child_path)?;
    update_node(&detached, new_parent, |node| node.children.push(subtree.clone()))
}

/// Remove the node at `path` (non-empty) and hand back its shared subtree.
fn detach(tree: &MindTree, path: &[usize]) -> EditResult<(MindTree, Arc<Node>)> {
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(EditRejection::RootProtected);
    };
    let mut removed = None;
    let root = update_at(tree.root_arc(), parent_path, &mut |parent: &mut Node| {
        if index < parent.children.len() {
            removed = Some(parent.children.remove(index));
        }
    });
    match removed {
        Some(subtree) => Ok((MindTree::from_arc(root), subtree)),
        None => Err(EditRejection::UnknownNode(tree.root_id())),
    }
}
