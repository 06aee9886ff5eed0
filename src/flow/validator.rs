use ahash::AHashSet;
use itertools::Itertools;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use super::action::NodeAction;
use super::document::{Flow, NodeId};

/// The kind of problem a validation issue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    MissingRoot,
    DuplicateId,
    EmptyMessage,
    EmptyMenu,
    UnlabeledOption,
    EmptyPrompt,
    DanglingTarget,
    DanglingChild,
    ChildDrift,
    Unreachable,
}

/// A single problem found in a flow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub node_id: NodeId,
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node '{}': {}", self.node_id, self.message)
    }
}

/// The result of checking a flow document. Issues never block rendering or
/// editing; the canvas uses [`ValidationReport::invalid_ids`] to badge the
/// affected nodes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Ids of every node with at least one issue, for the canvas invalid
    /// set.
    pub fn invalid_ids(&self) -> AHashSet<NodeId> {
        self.issues
            .iter()
            .map(|issue| issue.node_id.clone())
            .collect()
    }

    fn push(&mut self, node_id: impl Into<NodeId>, rule: Rule, message: impl Into<String>) {
        self.issues.push(Issue {
            node_id: node_id.into(),
            rule,
            message: message.into(),
        });
    }
}

/// Checks a flow document against all content and structure rules.
///
/// Validation is advisory: a flow that fails every rule still renders and
/// still saves. The report feeds the invalid badge set of the canvas and
/// the issue list of the CLI.
pub fn validate(flow: &Flow) -> ValidationReport {
    let mut report = ValidationReport::default();

    if flow.root().is_none() {
        report.push(
            flow.root_id.clone(),
            Rule::MissingRoot,
            format!("root id '{}' is not present in the node set", flow.root_id),
        );
    }

    for id in flow.nodes.iter().map(|node| &node.id).duplicates() {
        report.push(
            id.clone(),
            Rule::DuplicateId,
            "id appears more than once in the document",
        );
    }

    for node in &flow.nodes {
        check_content(&mut report, node.id.as_str(), &node.action);

        for (handle, target) in node.action.assignments() {
            if let Some(target) = target {
                if !flow.contains(&target) {
                    report.push(
                        node.id.clone(),
                        Rule::DanglingTarget,
                        format!("handle '{}' points at missing node '{}'", handle, target),
                    );
                }
            }
        }

        for child in &node.children {
            if !flow.contains(child) {
                report.push(
                    node.id.clone(),
                    Rule::DanglingChild,
                    format!("children list names missing node '{}'", child),
                );
            }
        }

        if node.children != node.action.child_list() {
            report.push(
                node.id.clone(),
                Rule::ChildDrift,
                "children list does not match the handle assignments",
            );
        }
    }

    for id in unreachable_ids(flow) {
        report.push(id, Rule::Unreachable, "node cannot be reached from the root");
    }

    report
}

fn check_content(report: &mut ValidationReport, id: &str, action: &NodeAction) {
    match action {
        NodeAction::Message { text, .. } => {
            if text.trim().is_empty() {
                report.push(id, Rule::EmptyMessage, "message text is empty");
            }
        }
        NodeAction::Menu { prompt, options } => {
            if prompt.trim().is_empty() {
                report.push(id, Rule::EmptyPrompt, "menu prompt is empty");
            }
            if options.is_empty() {
                report.push(id, Rule::EmptyMenu, "menu has no options");
            }
            for (index, option) in options.iter().enumerate() {
                if option.label.trim().is_empty() {
                    report.push(
                        id,
                        Rule::UnlabeledOption,
                        format!("menu option {} ('{}') has no label", index, option.key),
                    );
                }
            }
        }
        NodeAction::Question { prompt, .. } => {
            if prompt.trim().is_empty() {
                report.push(id, Rule::EmptyPrompt, "question prompt is empty");
            }
        }
        NodeAction::Validation { .. } | NodeAction::Action { .. } | NodeAction::End => {}
    }
}

/// Ids of nodes that no walk from the root can reach, in document order.
/// Both the `children` lists and the raw handle assignments count as edges,
/// so a drifted document is judged by everything it declares.
fn unreachable_ids(flow: &Flow) -> Vec<NodeId> {
    let Some(root) = flow.root() else {
        // Without a root everything is unreachable, but the missing-root
        // issue already covers the document; stay quiet per node.
        return Vec::new();
    };

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    seen.insert(root.id.as_str());
    queue.push_back(root.id.as_str());

    while let Some(id) = queue.pop_front() {
        let Some(node) = flow.node(id) else { continue };
        let targets = node
            .children
            .iter()
            .cloned()
            .chain(node.action.assignments().into_iter().filter_map(|(_, t)| t));
        for target in targets {
            if let Some(next) = flow.node(&target) {
                if seen.insert(next.id.as_str()) {
                    queue.push_back(next.id.as_str());
                }
            }
        }
    }

    flow.nodes
        .iter()
        .filter(|node| !seen.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect()
}
