//! Common test utilities for building flow documents.
use charla::prelude::*;

/// Creates a small, valid flow with one branch point.
///
/// Shape: `root` (menu) -> [`plans`, `advisor`]; `plans` (message) ->
/// `pricing`. Breadth-first that is depth 0: root, depth 1: plans and
/// advisor, depth 2: pricing.
#[allow(dead_code)]
pub fn create_branching_flow() -> Flow {
    let root = FlowNode::new(
        "root",
        "Welcome",
        NodeAction::Menu {
            prompt: "How can we help?".to_string(),
            options: vec![
                MenuOption {
                    key: "1".to_string(),
                    label: "See plans".to_string(),
                    next: Some("plans".to_string()),
                },
                MenuOption {
                    key: "2".to_string(),
                    label: "Talk to an advisor".to_string(),
                    next: Some("advisor".to_string()),
                },
            ],
        },
    );
    let plans = FlowNode::new(
        "plans",
        "Plans",
        NodeAction::Message {
            text: "Our plans start at $9.99 a month.".to_string(),
            attachment: None,
            next: Some("pricing".to_string()),
        },
    );
    let advisor = FlowNode::new(
        "advisor",
        "Advisor",
        NodeAction::Action {
            op: ActionOp::Assign {
                advisor: "ana".to_string(),
            },
            next: None,
        },
    );
    let pricing = FlowNode::new(
        "pricing",
        "Pricing",
        NodeAction::Message {
            text: "The full price list is on our website.".to_string(),
            attachment: None,
            next: None,
        },
    );

    Flow {
        root_id: "root".to_string(),
        nodes: vec![root, plans, advisor, pricing],
    }
}

/// Creates a signup flow containing a validation retry loop: `ask`
/// (question) -> `check` (validation), whose invalid branch points back at
/// `ask`.
#[allow(dead_code)]
pub fn create_signup_flow() -> Flow {
    let ask = FlowNode::new(
        "ask",
        "Ask email",
        NodeAction::Question {
            prompt: "What is your email?".to_string(),
            save_as: Some("email".to_string()),
            next: Some("check".to_string()),
        },
    );
    let check = FlowNode::new(
        "check",
        "Check email",
        NodeAction::Validation {
            input: Some("email".to_string()),
            on_valid: Some("done".to_string()),
            on_invalid: Some("ask".to_string()),
        },
    );
    let done = FlowNode::new(
        "done",
        "Thanks",
        NodeAction::Message {
            text: "Thanks, we will be in touch!".to_string(),
            attachment: None,
            next: None,
        },
    );

    Flow {
        root_id: "ask".to_string(),
        nodes: vec![ask, check, done],
    }
}

/// Creates a two-node cycle: `a` (message) -> `b` (message) -> `a`.
#[allow(dead_code)]
pub fn create_cyclic_flow() -> Flow {
    let a = FlowNode::new(
        "a",
        "First",
        NodeAction::Message {
            text: "ping".to_string(),
            attachment: None,
            next: Some("b".to_string()),
        },
    );
    let b = FlowNode::new(
        "b",
        "Second",
        NodeAction::Message {
            text: "pong".to_string(),
            attachment: None,
            next: Some("a".to_string()),
        },
    );

    Flow {
        root_id: "a".to_string(),
        nodes: vec![a, b],
    }
}

/// Creates a deliberately broken flow exercising most validation rules:
/// an empty menu at the root, an unreachable empty message with a dangling
/// target, and a node whose `children` list drifted from its assignments.
#[allow(dead_code)]
pub fn create_messy_flow() -> Flow {
    let start = FlowNode::new(
        "start",
        "Start",
        NodeAction::Menu {
            prompt: String::new(),
            options: Vec::new(),
        },
    );
    let ghost = FlowNode::new(
        "ghost",
        "Ghost",
        NodeAction::Message {
            text: String::new(),
            attachment: None,
            next: Some("nowhere".to_string()),
        },
    );
    let mut drifted = FlowNode::new(
        "drifted",
        "Drifted",
        NodeAction::Message {
            text: "I claim a child I never point at.".to_string(),
            attachment: None,
            next: None,
        },
    );
    drifted.children = vec!["start".to_string()];

    Flow {
        root_id: "start".to_string(),
        nodes: vec![start, ghost, drifted],
    }
}
