//! Integration tests: structural guarantees of the pure edit functions.

use mm_core::codec::from_persisted_json;
use mm_core::edit::{self, EditRejection};
use mm_core::id::NodeId;
use mm_core::model::MindTree;

fn plan() -> MindTree {
    from_persisted_json(include_str!("fixtures/project_plan.json")).unwrap()
}

fn ids(tree: &MindTree) -> Vec<NodeId> {
    tree.iter().map(|n| n.id).collect()
}

#[test]
fn delete_removes_exactly_the_subtree() {
    let tree = plan();
    let research = NodeId::intern("research");
    let removed = ids(&MindTree::new(tree.get(research).unwrap().clone()));

    let next = edit::delete_node(&tree, research).unwrap();
    let mut expected: Vec<NodeId> = ids(&tree);
    expected.retain(|id| !removed.contains(id));
    assert_eq!(ids(&next), expected);
}

#[test]
fn reparent_into_own_subtree_leaves_tree_unchanged() {
    let tree = plan();
    let design = NodeId::intern("design");
    for target in [design, NodeId::intern("wireframes")] {
        assert!(edit::reparent(&tree, design, target).is_err());
    }
    // The input is never mutated either way.
    assert_eq!(tree, plan());
}

#[test]
fn reparent_keeps_every_node_once() {
    let tree = plan();
    let next =
        edit::reparent(&tree, NodeId::intern("research"), NodeId::intern("launch")).unwrap();
    let mut before = ids(&tree);
    let mut after = ids(&next);
    before.sort_by_key(|id| id.as_str().to_string());
    after.sort_by_key(|id| id.as_str().to_string());
    assert_eq!(before, after);
    assert_eq!(
        next.parent_of(NodeId::intern("survey")).map(|n| n.id),
        Some(NodeId::intern("research"))
    );
    assert_eq!(next.depth_of(NodeId::intern("survey")), Some(3));
}

#[test]
fn edits_never_change_ids() {
    let tree = plan();
    let launch = NodeId::intern("launch");
    let next = edit::rename_node(&tree, launch, "Go live").unwrap();
    let next = edit::toggle_collapse(&next, launch).unwrap();
    let next = edit::move_node(&next, launch, 0.0, 0.0).unwrap();
    assert_eq!(ids(&next), ids(&tree));
}

#[test]
fn unknown_ids_are_rejected() {
    let tree = plan();
    let ghost = NodeId::intern("ghost");
    assert_eq!(
        edit::rename_node(&tree, ghost, "x").unwrap_err(),
        EditRejection::UnknownNode(ghost)
    );
    assert_eq!(
        edit::delete_node(&tree, ghost).unwrap_err(),
        EditRejection::UnknownNode(ghost)
    );
}
