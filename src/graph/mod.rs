//! The pure adapter that turns a flow document into renderable canvas
//! geometry.
//!
//! [`build_graph`] is a read-only projection: it never mutates the
//! document, and it never fails. Inconsistent input (stale child ids,
//! targets outside the visible set, a root that does not exist) results in
//! fewer nodes and edges, not errors.

mod layout;
mod outline;

pub use layout::{COLUMN_WIDTH, ROW_HEIGHT, auto_layout};
pub use outline::outline;
#[cfg(feature = "debug-tools")]
pub use outline::write_graph_snapshot;

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::flow::{Flow, FlowNode, HandleId, HandleSpec, NodeId, Position};

/// Edge rendering style understood by the canvas host. Every flow edge is
/// a step edge; the variant exists so the wire shape stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    Step,
}

/// One renderable node of the canvas graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode<'a> {
    pub id: NodeId,
    /// The underlying document node this render node presents.
    pub node: &'a FlowNode,
    /// Output handles in display order.
    pub handles: Vec<HandleSpec>,
    /// Current target of each handle, visible or not.
    pub assignments: AHashMap<HandleId, Option<NodeId>>,
    /// True when the validator flagged this node.
    pub invalid: bool,
    pub is_root: bool,
    pub position: Position,
}

/// One renderable edge: a handle assignment whose target is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    /// Stable id of the form `source:handle->target`.
    pub id: String,
    pub source: NodeId,
    pub source_handle: HandleId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// The complete adapter output for one render pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView<'a> {
    pub nodes: Vec<RenderNode<'a>>,
    pub edges: Vec<RenderEdge>,
    /// Ids of the rendered nodes, in render order.
    pub visible_ids: Vec<NodeId>,
}

impl GraphView<'_> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode<'_>> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Builds the renderable graph for a flow document.
///
/// With `solo_root` set, only the root and its immediate children are
/// visible; otherwise every node is, in document order. Edges are emitted
/// for handle assignments whose source and target are both visible,
/// anything else is silently dropped. Each node's position is the
/// breadth-first grid position unless `overrides` carries a finite manual
/// position for it, which wins. Ids in `invalid` mark the matching render
/// nodes; ids that match nothing are ignored.
///
/// A `root_id` that names no node yields an empty view.
pub fn build_graph<'a>(
    flow: &'a Flow,
    solo_root: bool,
    invalid: &AHashSet<NodeId>,
    overrides: &AHashMap<NodeId, Position>,
) -> GraphView<'a> {
    if flow.root().is_none() {
        return GraphView {
            nodes: Vec::new(),
            edges: Vec::new(),
            visible_ids: Vec::new(),
        };
    }

    let visible_ids = visible_ids(flow, solo_root);
    let visible: AHashSet<NodeId> = visible_ids.iter().cloned().collect();
    let computed = layout::compute_layout(flow, &visible_ids, &visible);

    let mut nodes = Vec::with_capacity(visible_ids.len());
    let mut edges = Vec::new();
    for id in &visible_ids {
        let Some(node) = flow.node(id) else { continue };

        let assignments = node.action.assignments();
        for (handle, target) in &assignments {
            let Some(target) = target else { continue };
            if visible.contains(target) {
                edges.push(RenderEdge {
                    id: format!("{}:{}->{}", id, handle, target),
                    source: id.clone(),
                    source_handle: handle.clone(),
                    target: target.clone(),
                    kind: EdgeKind::Step,
                });
            }
        }

        let position = overrides
            .get(id)
            .filter(|p| p.is_finite())
            .or_else(|| computed.get(id))
            .copied()
            .unwrap_or(Position { x: 0.0, y: 0.0 });

        nodes.push(RenderNode {
            id: id.clone(),
            node,
            handles: node.action.handle_specs(),
            assignments: assignments.into_iter().collect(),
            invalid: invalid.contains(id),
            is_root: *id == flow.root_id,
            position,
        });
    }

    GraphView {
        nodes,
        edges,
        visible_ids,
    }
}

/// The ids to render, deduplicated, in render order: root plus its
/// existing immediate children when soloed, otherwise every node in
/// document order.
fn visible_ids(flow: &Flow, solo_root: bool) -> Vec<NodeId> {
    let mut seen: AHashSet<NodeId> = AHashSet::new();
    let mut ids = Vec::new();

    if solo_root {
        if seen.insert(flow.root_id.clone()) {
            ids.push(flow.root_id.clone());
        }
        if let Some(root) = flow.root() {
            for child in &root.children {
                if flow.contains(child) && seen.insert(child.clone()) {
                    ids.push(child.clone());
                }
            }
        }
    } else {
        for node in &flow.nodes {
            if seen.insert(node.id.clone()) {
                ids.push(node.id.clone());
            }
        }
    }
    ids
}
