use charla::prelude::*;
use clap::Parser;
use itertools::Itertools;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the CRM export format, which keys nodes by id instead
// of storing the canonical node list. They are only used here for conversion.

#[derive(Deserialize)]
struct RawDocument {
    #[serde(alias = "rootId")]
    root_id: String,
    nodes: BTreeMap<String, RawNode>,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(default)]
    label: String,
    #[serde(default)]
    description: Option<String>,
    action: NodeAction,
    #[serde(default)]
    children: Vec<String>,
}

// --- Converter Implementation ---
// This implements the conversion from the raw keyed export to the canonical
// Flow document. Map iteration is ordered by id, which becomes the document
// order.

impl IntoFlow for RawDocument {
    fn into_flow(self) -> std::result::Result<Flow, FlowConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|(id, raw)| FlowNode {
                id,
                label: raw.label,
                description: raw.description,
                action: raw.action,
                children: raw.children,
            })
            .collect();

        let flow = Flow {
            root_id: self.root_id,
            nodes,
        };
        if flow.root().is_none() {
            return Err(FlowConversionError::RootNotFound(flow.root_id));
        }
        Ok(flow)
    }
}

/// A conversation flow inspection and rendering CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document JSON file
    flow_path: Option<String>,
    /// Optional path to a JSON file of manually dragged positions
    positions_path: Option<String>,

    /// Render only the root and its immediate children
    #[arg(short, long)]
    solo_root: bool,

    /// Write the rendered graph view as JSON to this path
    #[arg(long)]
    export: Option<String>,

    /// Write a binary flow archive to this path
    #[arg(long)]
    archive: Option<String>,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

fn run_render(
    flow_path: String,
    positions_path: Option<String>,
    solo_root: bool,
    export: Option<String>,
    archive: Option<String>,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let flow_json = fs::read_to_string(&flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", &flow_path, e))
    });

    let overrides: AHashMap<NodeId, Position> = if let Some(path) = positions_path {
        let positions_json = fs::read_to_string(&path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read positions file '{}': {}", path, e))
        });
        serde_json::from_str(&positions_json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to parse positions JSON: {}", e))
        })
    } else {
        AHashMap::new()
    };
    let load_duration = load_start.elapsed();

    // --- 2. Parsing and Conversion ---
    // Canonical documents parse directly; anything else is treated as a
    // keyed CRM export and converted.
    let flow = match Flow::from_json(&flow_json) {
        Ok(flow) => flow,
        Err(_) => {
            let raw: RawDocument = serde_json::from_str(&flow_json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow JSON: {}", e)));
            raw.into_flow()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert flow: {}", e)))
        }
    };

    // --- 3. Validation ---
    println!("\nChecking flow document...");
    let validate_start = Instant::now();
    let report = validate(&flow);
    let validate_duration = validate_start.elapsed();

    if report.is_clean() {
        println!("No issues found.");
    } else {
        println!("Found {} issue(s):", report.issues.len());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    // --- 4. Graph Build ---
    println!("\nBuilding canvas graph...");
    let build_start = Instant::now();
    let view = build_graph(&flow, solo_root, &report.invalid_ids(), &overrides);
    let build_duration = build_start.elapsed();

    println!(
        "Graph built: {} of {} nodes visible, {} edges",
        view.nodes.len(),
        flow.nodes.len(),
        view.edges.len()
    );

    println!("\n--- Flow Outline ---");
    print!("{}", outline(&view));

    #[cfg(feature = "debug-tools")]
    {
        match charla::graph::write_graph_snapshot(&view, "tmp") {
            Ok(()) => println!("\nDebug snapshot written to tmp/graph.json and tmp/graph.txt"),
            Err(e) => eprintln!("\nWarning: could not write debug snapshot: {}", e),
        }
    }

    // --- 5. Exports ---
    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&view).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to serialize graph view: {}", e))
        });
        fs::write(&path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write graph view to '{}': {}", path, e))
        });
        println!("\nGraph view exported to '{}'", path);
    }

    if let Some(path) = archive {
        FlowArchive::new(flow.clone(), overrides.clone())
            .save(&path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write archive: {}", e)));
        println!("Archive written to '{}'", path);
    }

    // --- 6. Summary ---
    let total_duration = total_start.elapsed();
    println!("\n--- Document Summary ---");
    let counts = flow.nodes.iter().map(|node| node.kind()).counts();
    for (kind, count) in counts.into_iter().sorted_by_key(|(kind, _)| kind.as_str()) {
        println!("{:<12} {}", format!("{}:", kind), count);
    }
    println!("Manual positions: {}", overrides.len());

    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Validation:     {:?}", validate_duration);
    println!("Graph Build:    {:?}", build_duration);
    println!("-----------------------------");
    println!("Total Execution: {:?}", total_duration);
    println!();
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let flow_path = cli.flow_path.unwrap_or_else(|| {
        exit_with_error("Flow path is required in non-interactive mode.");
    });

    run_render(
        flow_path,
        cli.positions_path,
        cli.solo_root,
        cli.export,
        cli.archive,
    );
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Charla Interactive Mode ---");

    let flow_path = prompt_for_input("Enter flow document path", Some("data/flow.json"));
    let positions_path_str = prompt_for_input("Enter positions path (optional)", None);
    let positions_path = if positions_path_str.is_empty() {
        None
    } else {
        Some(positions_path_str)
    };

    let solo_root = loop {
        let choice = prompt_for_input("Render only the root and its children? (y/n)", Some("n"));
        match choice.trim() {
            "y" | "Y" => break true,
            "n" | "N" => break false,
            _ => println!("Invalid choice. Please enter y or n."),
        }
    };

    run_render(flow_path, positions_path, solo_root, None, None);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
