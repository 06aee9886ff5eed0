//! # Charla - Conversation Flow Canvas Engine
//!
//! **Charla** is the headless engine behind a node-based conversation flow
//! builder: the kind of canvas where a support team wires up welcome
//! menus, questions and handover rules for a messaging bot. The crate owns
//! the document model, the editing rules and the graph projection; drawing
//! pixels and talking to messaging APIs stay in the host application.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic and operates on a canonical [`flow::Flow`]
//! document. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your persisted flow into the canonical model, either directly from its JSON form or by implementing [`flow::IntoFlow`] for your own document structs.
//! 2.  **Edit**: Mutate the document through a [`flow::FlowEditor`], or drive one interactively with a [`canvas::CanvasController`] wired to your UI.
//! 3.  **Check**: Run [`flow::validate`] to collect advisory issues; nothing ever blocks rendering.
//! 4.  **Render**: Call [`graph::build_graph`] to project the document into positioned nodes and edges for whatever draws your canvas.
//!
//! ## Quick Start
//!
//! The following example parses a small flow and projects it into
//! renderable geometry.
//!
//! ```rust
//! use charla::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "rootId": "welcome",
//!         "nodes": [
//!             {
//!                 "id": "welcome",
//!                 "label": "Bienvenida",
//!                 "action": {
//!                     "kind": "menu",
//!                     "prompt": "How can we help?",
//!                     "options": [
//!                         { "key": "1", "label": "See plans", "next": "plans" },
//!                         { "key": "2", "label": "Talk to an advisor", "next": "advisor" }
//!                     ]
//!                 },
//!                 "children": ["plans", "advisor"]
//!             },
//!             {
//!                 "id": "plans",
//!                 "label": "Plans",
//!                 "action": { "kind": "message", "text": "Our plans start at..." },
//!                 "children": []
//!             },
//!             {
//!                 "id": "advisor",
//!                 "label": "Advisor",
//!                 "action": { "kind": "action", "op": { "type": "assign", "advisor": "ana" } },
//!                 "children": []
//!             }
//!         ]
//!     }"#;
//!
//!     // Parse the document and check it.
//!     let flow = Flow::from_json(json)?;
//!     let report = validate(&flow);
//!
//!     // Project it into renderable geometry.
//!     let view = build_graph(&flow, false, &report.invalid_ids(), &AHashMap::new());
//!     for node in &view.nodes {
//!         println!("{} at ({}, {})", node.node.label, node.position.x, node.position.y);
//!     }
//!     assert_eq!(view.edges.len(), 2);
//!
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod error;
pub mod flow;
pub mod graph;
pub mod prelude;

#[cfg(feature = "wasm-bindings")]
mod wasm;
