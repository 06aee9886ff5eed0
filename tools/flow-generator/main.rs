use ahash::AHashMap;
use charla::flow::{
    ActionOp, Flow, FlowNode, MenuOption, NodeAction, NodeId, NodeKind, Position, validate,
};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fs;

/// A CLI tool to generate synthetic conversation flows for testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated flow JSON to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Optional path to write randomly dragged positions to
    #[arg(long)]
    positions: Option<String>,

    /// Maximum depth of the generated tree below the root
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Maximum number of options per menu node
    #[arg(long, default_value_t = 3)]
    branching: usize,

    /// Seed for reproducible output; omit for a random flow
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.branching < 2 {
        eprintln!("Error: --branching ({}) must be at least 2", cli.branching);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating conversation flow (depth {}, branching up to {})...",
        cli.depth, cli.branching
    );

    let (flow, positions) = generate_flow(&mut rng, cli.depth, cli.branching);
    println!("-> Generated {} nodes.", flow.nodes.len());

    let report = validate(&flow);
    if report.is_clean() {
        println!("-> Flow passes validation.");
    } else {
        println!("-> Flow has {} validation issue(s).", report.issues.len());
    }

    let json_output = serde_json::to_string_pretty(&flow)?;
    fs::write(&cli.output, json_output)?;
    println!("Successfully generated and saved flow to '{}'", cli.output);

    if let Some(path) = cli.positions {
        let json_output = serde_json::to_string_pretty(&positions)?;
        fs::write(&path, json_output)?;
        println!("Saved {} dragged position(s) to '{}'", positions.len(), path);
    }

    Ok(())
}

/// Generates a flow rooted at a menu, plus manual positions for a random
/// subset of nodes as if a user had dragged them around.
fn generate_flow(
    rng: &mut StdRng,
    depth: usize,
    branching: usize,
) -> (Flow, AHashMap<NodeId, Position>) {
    let mut nodes = Vec::new();
    let mut counter = 0u32;
    let root_id = spawn_node(rng, &mut nodes, &mut counter, NodeKind::Menu, depth, branching);

    let flow = Flow { root_id, nodes };

    let mut positions = AHashMap::new();
    for node in &flow.nodes {
        if rng.random_range(0..100) < 20 {
            positions.insert(
                node.id.clone(),
                Position::new(
                    rng.random_range(-200.0..2400.0),
                    rng.random_range(-100.0..1400.0),
                ),
            );
        }
    }

    (flow, positions)
}

/// Creates a node of the given kind, recursively spawning its subtree, and
/// returns its id. Nodes are pushed in pre-order so the root lands first in
/// document order.
fn spawn_node(
    rng: &mut StdRng,
    nodes: &mut Vec<FlowNode>,
    counter: &mut u32,
    kind: NodeKind,
    depth_left: usize,
    branching: usize,
) -> NodeId {
    *counter += 1;
    let id = format!("{}-{}", kind.as_str(), counter);
    let index = nodes.len();
    nodes.push(FlowNode::new(
        id.clone(),
        label_for(rng, kind),
        NodeAction::default_for(kind),
    ));

    let action = match kind {
        NodeKind::Message => NodeAction::Message {
            text: pick(rng, MESSAGE_TEXTS).to_string(),
            attachment: None,
            next: maybe_child(rng, nodes, counter, depth_left, branching, 60),
        },
        NodeKind::Menu => {
            let option_count = rng.random_range(2..=branching);
            let options = (0..option_count)
                .map(|i| MenuOption {
                    key: (i + 1).to_string(),
                    label: pick(rng, OPTION_LABELS).to_string(),
                    next: maybe_child(rng, nodes, counter, depth_left, branching, 90),
                })
                .collect();
            NodeAction::Menu {
                prompt: pick(rng, MENU_PROMPTS).to_string(),
                options,
            }
        }
        NodeKind::Question => NodeAction::Question {
            prompt: pick(rng, QUESTION_PROMPTS).to_string(),
            save_as: Some(pick(rng, FIELD_NAMES).to_string()),
            next: maybe_child(rng, nodes, counter, depth_left, branching, 70),
        },
        NodeKind::Validation => NodeAction::Validation {
            input: Some(pick(rng, FIELD_NAMES).to_string()),
            on_valid: maybe_child(rng, nodes, counter, depth_left, branching, 90),
            on_invalid: maybe_child(rng, nodes, counter, depth_left, branching, 50),
        },
        NodeKind::Action => NodeAction::Action {
            op: random_op(rng),
            next: maybe_child(rng, nodes, counter, depth_left, branching, 40),
        },
        NodeKind::End => NodeAction::End,
    };

    let children = action.child_list();
    nodes[index].action = action;
    nodes[index].children = children;
    id
}

/// Spawns a child subtree with the given percent probability, as long as
/// there is remaining depth.
fn maybe_child(
    rng: &mut StdRng,
    nodes: &mut Vec<FlowNode>,
    counter: &mut u32,
    depth_left: usize,
    branching: usize,
    percent: u32,
) -> Option<NodeId> {
    if depth_left == 0 || rng.random_range(0..100) >= percent {
        return None;
    }
    let kind = random_kind(rng, depth_left - 1);
    Some(spawn_node(
        rng,
        nodes,
        counter,
        kind,
        depth_left - 1,
        branching,
    ))
}

/// Picks a node kind, biased towards content nodes. Subtrees that ran out
/// of depth only get leaves.
fn random_kind(rng: &mut StdRng, depth_left: usize) -> NodeKind {
    if depth_left == 0 {
        return if rng.random_range(0..100) < 70 {
            NodeKind::Message
        } else {
            NodeKind::End
        };
    }
    match rng.random_range(0..100) {
        0..25 => NodeKind::Menu,
        25..55 => NodeKind::Message,
        55..75 => NodeKind::Question,
        75..85 => NodeKind::Validation,
        85..95 => NodeKind::Action,
        _ => NodeKind::End,
    }
}

fn random_op(rng: &mut StdRng) -> ActionOp {
    match rng.random_range(0..3) {
        0 => ActionOp::Webhook {
            url: format!(
                "https://crm.example.com/hooks/{}",
                pick(rng, &["orders", "leads", "support"])
            ),
        },
        1 => ActionOp::Assign {
            advisor: pick(rng, &["ana", "luis", "sofia", "marco"]).to_string(),
        },
        _ => ActionOp::Tag {
            name: pick(rng, &["vip", "new-customer", "billing", "complaint"]).to_string(),
        },
    }
}

fn label_for(rng: &mut StdRng, kind: NodeKind) -> String {
    let pool = match kind {
        NodeKind::Message => MESSAGE_LABELS,
        NodeKind::Menu => MENU_LABELS,
        NodeKind::Question => QUESTION_LABELS,
        NodeKind::Validation => VALIDATION_LABELS,
        NodeKind::Action => ACTION_LABELS,
        NodeKind::End => &["Goodbye", "Conversation end"],
    };
    pick(rng, pool).to_string()
}

fn pick<'a>(rng: &mut StdRng, values: &'a [&'a str]) -> &'a str {
    values[rng.random_range(0..values.len())]
}

// --- Label Pools ---

const MENU_LABELS: &[&str] = &["Main menu", "Support options", "Sales menu", "Billing menu"];
const MENU_PROMPTS: &[&str] = &[
    "How can we help you today?",
    "Please choose an option:",
    "What would you like to do?",
];
const OPTION_LABELS: &[&str] = &[
    "See our plans",
    "Talk to an advisor",
    "Track my order",
    "Opening hours",
    "Something else",
];
const MESSAGE_LABELS: &[&str] = &["Welcome", "Plan details", "Opening hours", "Thank you"];
const MESSAGE_TEXTS: &[&str] = &[
    "Thanks for reaching out! We will get back to you shortly.",
    "Our plans start at $9.99 a month.",
    "We are open Monday to Friday, 9am to 6pm.",
    "You can find the full catalog on our website.",
];
const QUESTION_LABELS: &[&str] = &["Ask name", "Ask email", "Ask order number"];
const QUESTION_PROMPTS: &[&str] = &[
    "What is your name?",
    "What email should we use to contact you?",
    "What is your order number?",
];
const VALIDATION_LABELS: &[&str] = &["Check email", "Check phone", "Check zip code"];
const ACTION_LABELS: &[&str] = &["Notify CRM", "Assign advisor", "Tag conversation"];
const FIELD_NAMES: &[&str] = &["name", "email", "phone", "order_number", "zip"];
