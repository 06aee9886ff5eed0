use serde::{Deserialize, Serialize};

use super::action::{NodeAction, NodeKind};
use crate::error::FlowConversionError;

/// Identifier of a node within a flow document.
pub type NodeId = String;

/// A 2D canvas position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite numbers. Positions that fail
    /// this check never override the computed layout.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A single node in a conversation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub action: NodeAction,
    /// Denormalized list of child ids, kept in step with the action's
    /// branch targets by the editor. Hand-edited documents may have
    /// drifted, so consumers tolerate stale entries here.
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl FlowNode {
    /// Creates a node with its `children` list derived from the action's
    /// current branch targets.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, action: NodeAction) -> Self {
        let children = action.child_list();
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            action,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.action.kind()
    }
}

/// A complete conversation flow document: a set of nodes rooted at
/// `root_id`. Node order in `nodes` is the document order used for
/// show-all rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub root_id: NodeId,
    pub nodes: Vec<FlowNode>,
}

impl Flow {
    /// Creates a flow containing only the given root node.
    pub fn new(root: FlowNode) -> Self {
        Self {
            root_id: root.id.clone(),
            nodes: vec![root],
        }
    }

    /// Parses a flow from its canonical JSON form.
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        serde_json::from_str(json)
            .map_err(|e| FlowConversionError::JsonParseError(e.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// The root node, if `root_id` names a node that actually exists.
    pub fn root(&self) -> Option<&FlowNode> {
        self.node(&self.root_id)
    }

    /// Child ids of `id` that are present in the node set, in the order the
    /// node lists them. Stale entries are skipped without complaint.
    pub fn existing_children(&self, id: &str) -> Vec<&NodeId> {
        match self.node(id) {
            Some(node) => node
                .children
                .iter()
                .filter(|child| self.contains(child))
                .collect(),
            None => Vec::new(),
        }
    }
}
