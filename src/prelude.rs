//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from
//! the charla crate. Import this module to get access to the core
//! functionality without having to import each type individually.
//!
//! # Example
//!
//! ```rust
//! // Use the prelude to get easy access to all the core types.
//! use charla::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Start a document from its root and grow it through the editor.
//! let root = FlowNode::new(
//!     "welcome",
//!     "Welcome",
//!     NodeAction::Menu {
//!         prompt: "How can we help?".to_string(),
//!         options: vec![MenuOption {
//!             key: "1".to_string(),
//!             label: "Plans".to_string(),
//!             next: None,
//!         }],
//!     },
//! );
//! let mut editor = FlowEditor::new(Flow::new(root));
//! let child = editor.add_child("welcome", "option-0", NodeKind::Message)?;
//! assert!(editor.flow().contains(&child));
//!
//! // Project the document into canvas geometry.
//! let view = build_graph(editor.flow(), false, &AHashSet::new(), editor.positions());
//! assert_eq!(view.edges.len(), 1);
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Document model and editing
pub use crate::flow::{
    ActionOp, Attachment, Flow, FlowArchive, FlowEditor, FlowNode, HandleId, HandleSpec,
    IdGenerator, IntoFlow, MenuOption, NodeAction, NodeId, NodeKind, Position,
};

// Validation
pub use crate::flow::{Issue, Rule, ValidationReport, validate};

// Graph projection
pub use crate::graph::{
    COLUMN_WIDTH, EdgeKind, GraphView, ROW_HEIGHT, RenderEdge, RenderNode, auto_layout,
    build_graph, outline,
};

// Canvas interaction
pub use crate::canvas::{CanvasController, CanvasHost, PendingConnection};

// Error types
pub use crate::error::{ArchiveError, EditError, FlowConversionError};

// Hashed collections used throughout the public API
pub use ahash::{AHashMap, AHashSet};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
