use ahash::{AHashMap, AHashSet};
use std::fmt::Write;

use super::{GraphView, RenderNode};

/// Renders an indented text outline of a graph view for terminal output.
///
/// Subtrees are printed depth-first under their parent, following the
/// visible edges; nodes that only a cycle or nothing at all points to are
/// appended at top level afterwards.
pub fn outline(view: &GraphView<'_>) -> String {
    let by_id: AHashMap<&str, &RenderNode<'_>> = view
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    let mut out = String::new();
    let mut seen: AHashSet<&str> = AHashSet::new();
    let ordered = view
        .nodes
        .iter()
        .filter(|node| node.is_root)
        .chain(view.nodes.iter().filter(|node| !node.is_root));
    for node in ordered {
        render_subtree(node, 0, &by_id, &mut seen, &mut out);
    }
    out
}

fn render_subtree<'v, 'a>(
    node: &'v RenderNode<'a>,
    depth: usize,
    by_id: &AHashMap<&'v str, &'v RenderNode<'a>>,
    seen: &mut AHashSet<&'v str>,
    out: &mut String,
) {
    if !seen.insert(node.id.as_str()) {
        return;
    }

    let marker = if node.invalid { "  [invalid]" } else { "" };
    let _ = writeln!(
        out,
        "{:indent$}- {} <{}> @ ({:.0}, {:.0}){}",
        "",
        node.node.label,
        node.node.kind(),
        node.position.x,
        node.position.y,
        marker,
        indent = depth * 2
    );

    for handle in &node.handles {
        if let Some(Some(target)) = node.assignments.get(&handle.id) {
            if let Some(child) = by_id.get(target.as_str()) {
                render_subtree(child, depth + 1, by_id, seen, out);
            }
        }
    }
}

/// Dumps a graph view to `<dir>/graph.json` and `<dir>/graph.txt` for
/// offline inspection.
#[cfg(feature = "debug-tools")]
pub fn write_graph_snapshot(view: &GraphView<'_>, dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(view).map_err(std::io::Error::other)?;
    std::fs::write(format!("{}/graph.json", dir), json)?;
    std::fs::write(format!("{}/graph.txt", dir), outline(view))?;
    Ok(())
}
