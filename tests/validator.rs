//! Tests for the advisory document validator.
mod common;
use charla::prelude::*;
use common::*;

fn rules_for(report: &ValidationReport, id: &str) -> Vec<Rule> {
    report
        .issues
        .iter()
        .filter(|issue| issue.node_id == id)
        .map(|issue| issue.rule)
        .collect()
}

#[test]
fn test_clean_flow_has_no_issues() {
    let report = validate(&create_branching_flow());
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert!(report.invalid_ids().is_empty());
}

#[test]
fn test_signup_flow_with_retry_loop_is_clean() {
    let report = validate(&create_signup_flow());
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn test_empty_menu_and_prompt_are_reported() {
    let report = validate(&create_messy_flow());
    let rules = rules_for(&report, "start");
    assert!(rules.contains(&Rule::EmptyPrompt));
    assert!(rules.contains(&Rule::EmptyMenu));
}

#[test]
fn test_empty_message_text_is_reported() {
    let report = validate(&create_messy_flow());
    assert!(rules_for(&report, "ghost").contains(&Rule::EmptyMessage));
}

#[test]
fn test_dangling_target_and_child_are_reported() {
    let report = validate(&create_messy_flow());
    let rules = rules_for(&report, "ghost");
    assert!(rules.contains(&Rule::DanglingTarget));
    assert!(rules.contains(&Rule::DanglingChild));
}

#[test]
fn test_child_drift_is_reported() {
    let report = validate(&create_messy_flow());
    assert!(rules_for(&report, "drifted").contains(&Rule::ChildDrift));
}

#[test]
fn test_unreachable_nodes_are_reported() {
    let report = validate(&create_messy_flow());
    assert!(rules_for(&report, "ghost").contains(&Rule::Unreachable));
    assert!(rules_for(&report, "drifted").contains(&Rule::Unreachable));
    assert!(!rules_for(&report, "start").contains(&Rule::Unreachable));
}

#[test]
fn test_whitespace_only_text_counts_as_empty() {
    let mut flow = create_branching_flow();
    if let Some(node) = flow.node_mut("pricing") {
        if let NodeAction::Message { text, .. } = &mut node.action {
            *text = "   \n".to_string();
        }
    }
    let report = validate(&flow);
    assert!(rules_for(&report, "pricing").contains(&Rule::EmptyMessage));
}

#[test]
fn test_unlabeled_menu_option_is_reported() {
    let mut flow = create_branching_flow();
    if let Some(node) = flow.node_mut("root") {
        if let NodeAction::Menu { options, .. } = &mut node.action {
            options[1].label = String::new();
        }
    }
    let report = validate(&flow);
    let rules = rules_for(&report, "root");
    assert!(rules.contains(&Rule::UnlabeledOption));
    // The other option is fine, so the menu rules stay quiet.
    assert!(!rules.contains(&Rule::EmptyMenu));
}

#[test]
fn test_empty_question_prompt_is_reported() {
    let mut flow = create_signup_flow();
    if let Some(node) = flow.node_mut("ask") {
        if let NodeAction::Question { prompt, .. } = &mut node.action {
            prompt.clear();
        }
    }
    let report = validate(&flow);
    assert!(rules_for(&report, "ask").contains(&Rule::EmptyPrompt));
}

#[test]
fn test_duplicate_ids_are_reported() {
    let mut flow = create_branching_flow();
    flow.nodes.push(FlowNode::new("plans", "Shadow", NodeAction::End));
    let report = validate(&flow);
    assert!(rules_for(&report, "plans").contains(&Rule::DuplicateId));
}

#[test]
fn test_missing_root_is_reported_once() {
    let mut flow = create_branching_flow();
    flow.root_id = "nope".to_string();
    let report = validate(&flow);

    assert!(rules_for(&report, "nope").contains(&Rule::MissingRoot));
    // Per-node unreachable issues would drown the real problem.
    assert!(
        report
            .issues
            .iter()
            .all(|issue| issue.rule != Rule::Unreachable)
    );
}

#[test]
fn test_invalid_ids_deduplicate_nodes() {
    let report = validate(&create_messy_flow());
    let invalid = report.invalid_ids();

    // `ghost` carries several issues but appears once.
    assert!(invalid.contains("ghost"));
    assert!(invalid.contains("start"));
    assert!(invalid.contains("drifted"));
    assert_eq!(invalid.len(), 3);
}

#[test]
fn test_issues_never_block_rendering() {
    let flow = create_messy_flow();
    let report = validate(&flow);
    let view = build_graph(&flow, false, &report.invalid_ids(), &AHashMap::new());

    assert_eq!(view.nodes.len(), flow.nodes.len());
    assert!(view.nodes.iter().all(|node| node.invalid));
}
