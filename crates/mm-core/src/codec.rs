//! JSON encoding of mind map trees.
//!
//! Two shapes are supported:
//!
//! - the **persisted** shape (`id`, `name`, `children`, `collapsed`, `px`,
//!   `py`) written to the key-value store and read back at startup;
//! - the **export** shape (`name`, `children`, optional `px`/`py`) handed to
//!   users. Importing it always assigns fresh IDs.
//!
//! Decoding goes through `serde_json::Value` and coerces instead of
//! validating: a non-string name becomes `"Node"`, non-object children are
//! skipped, and a pin needs both coordinates to be numbers.

use crate::id::NodeId;
use crate::model::{FALLBACK_NAME, MindTree, Node};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Why a JSON document could not become a tree.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object for the root node")]
    NotAnObject,
}

// ─── Encoding ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PersistedNode<'a> {
    id: NodeId,
    name: &'a str,
    children: Vec<PersistedNode<'a>>,
    collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    py: Option<f64>,
}

impl<'a> PersistedNode<'a> {
    fn from_node(node: &'a Node) -> Self {
        Self {
            id: node.id,
            name: &node.name,
            children: node.children.iter().map(|c| Self::from_node(c)).collect(),
            collapsed: node.collapsed,
            px: node.pin.map(|p| p.x),
            py: node.pin.map(|p| p.y),
        }
    }
}

#[derive(Serialize)]
struct ExportedNode<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    py: Option<f64>,
    children: Vec<ExportedNode<'a>>,
}

impl<'a> ExportedNode<'a> {
    fn from_node(node: &'a Node) -> Self {
        Self {
            name: &node.name,
            px: node.pin.map(|p| p.x),
            py: node.pin.map(|p| p.y),
            children: node.children.iter().map(|c| Self::from_node(c)).collect(),
        }
    }
}

/// Compact JSON for the store's `tree` key.
pub fn to_persisted_json(tree: &MindTree) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&PersistedNode::from_node(tree.root()))?)
}

/// Pretty-printed JSON for the user: no IDs, no collapse state.
pub fn export_json(tree: &MindTree) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&ExportedNode::from_node(
        tree.root(),
    ))?)
}

// ─── Decoding ────────────────────────────────────────────────────────────

/// How IDs are assigned while decoding.
enum Ids {
    /// Always mint new IDs (user import).
    Fresh,
    /// Keep stored IDs; mint one when missing or already used in this document.
    Keep(HashSet<NodeId>),
}

impl Ids {
    fn assign(&mut self, obj: &Map<String, Value>) -> NodeId {
        match self {
            Ids::Fresh => NodeId::fresh(),
            Ids::Keep(seen) => {
                let stored = obj
                    .get("id")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(NodeId::intern);
                match stored {
                    Some(id) if seen.insert(id) => id,
                    _ => {
                        let id = NodeId::fresh();
                        seen.insert(id);
                        id
                    }
                }
            }
        }
    }
}

fn decode_node(obj: &Map<String, Value>, ids: &mut Ids) -> Node {
    let id = ids.assign(obj);
    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        _ => FALLBACK_NAME.to_string(),
    };
    let mut node = Node::new(id, name);

    node.collapsed = obj
        .get("collapsed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let px = obj.get("px").and_then(Value::as_f64);
    let py = obj.get("py").and_then(Value::as_f64);
    if let (Some(x), Some(y)) = (px, py) {
        node.pin = Some(Point::new(x, y));
    }

    if let Some(Value::Array(children)) = obj.get("children") {
        node.children = children
            .iter()
            .filter_map(Value::as_object)
            .map(|child| Arc::new(decode_node(child, ids)))
            .collect();
    }
    node
}

/// Parse without serde_json's nesting limit: each tree level is two levels
/// of JSON nesting (node object and `children` array).
fn parse(json: &str) -> Result<Value, CodecError> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

fn decode(json: &str, mut ids: Ids) -> Result<MindTree, CodecError> {
    let value = parse(json)?;
    let Value::Object(root) = value else {
        return Err(CodecError::NotAnObject);
    };
    Ok(MindTree::new(decode_node(&root, &mut ids)))
}

/// Read a tree written by `to_persisted_json`.
///
/// Stored IDs are kept; a missing or repeated ID is replaced by a fresh one.
pub fn from_persisted_json(json: &str) -> Result<MindTree, CodecError> {
    decode(json, Ids::Keep(HashSet::new()))
}

/// Read a user-supplied `{name, children, px?, py?}` document with fresh IDs.
pub fn import_json(json: &str) -> Result<MindTree, CodecError> {
    decode(json, Ids::Fresh)
}
