use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::flow::{Flow, NodeId, Position};

/// Horizontal distance between consecutive depth levels.
pub const COLUMN_WIDTH: f64 = 400.0;
/// Vertical distance between siblings within one level.
pub const ROW_HEIGHT: f64 = 120.0;

/// Computes fallback grid positions for every visible node.
///
/// The walk is breadth-first from the root, restricted to `visible`, with
/// level membership in discovery order: the node found as the `row`-th
/// member of depth `depth` lands at `(depth * COLUMN_WIDTH, row *
/// ROW_HEIGHT)`. A seen set drops revisits, so cyclic documents are laid
/// out once and truncated instead of looping. Visible nodes the root walk
/// never reaches continue the grid on the levels after the reachable ones,
/// seeded in document order.
pub(crate) fn compute_layout(
    flow: &Flow,
    visible_ids: &[NodeId],
    visible: &AHashSet<NodeId>,
) -> AHashMap<NodeId, Position> {
    let mut levels: Vec<Vec<NodeId>> = Vec::new();
    let mut seen: AHashSet<NodeId> = AHashSet::new();

    level_walk(flow, &flow.root_id, visible, &mut seen, &mut levels);
    for id in visible_ids {
        if !seen.contains(id) {
            level_walk(flow, id, visible, &mut seen, &mut levels);
        }
    }

    let mut positions = AHashMap::with_capacity(seen.len());
    for (depth, level) in levels.iter().enumerate() {
        for (row, id) in level.iter().enumerate() {
            positions.insert(
                id.clone(),
                Position::new(depth as f64 * COLUMN_WIDTH, row as f64 * ROW_HEIGHT),
            );
        }
    }
    positions
}

/// Breadth-first walk from `start` over the `children` lists, appending one
/// level vector per depth starting at the current end of `levels`.
fn level_walk(
    flow: &Flow,
    start: &NodeId,
    visible: &AHashSet<NodeId>,
    seen: &mut AHashSet<NodeId>,
    levels: &mut Vec<Vec<NodeId>>,
) {
    if !visible.contains(start) || !seen.insert(start.clone()) {
        return;
    }

    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    queue.push_back((start.clone(), levels.len()));

    while let Some((id, depth)) = queue.pop_front() {
        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        levels[depth].push(id.clone());

        if let Some(node) = flow.node(&id) {
            for child in &node.children {
                if visible.contains(child) && seen.insert(child.clone()) {
                    queue.push_back((child.clone(), depth + 1));
                }
            }
        }
    }
}

/// Grid positions for a whole document, ignoring visibility filters. Hosts
/// call this for a "tidy up" relayout that discards manual positions.
pub fn auto_layout(flow: &Flow) -> AHashMap<NodeId, Position> {
    let mut seen = AHashSet::new();
    let mut visible_ids = Vec::with_capacity(flow.nodes.len());
    for node in &flow.nodes {
        if seen.insert(node.id.clone()) {
            visible_ids.push(node.id.clone());
        }
    }
    compute_layout(flow, &visible_ids, &seen)
}
