use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

use super::action::{ActionOp, Attachment, MenuOption, NodeAction};
use super::document::{Flow, FlowNode, NodeId, Position};
use crate::error::ArchiveError;

/// A flow document bundled with its user-dragged positions, as persisted to
/// disk. Binary archives use bincode; [`FlowArchive::to_json`] produces the
/// interchange form hosts import and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowArchive {
    pub flow: Flow,
    #[serde(default)]
    pub positions: AHashMap<NodeId, Position>,
}

impl FlowArchive {
    pub fn new(flow: Flow, positions: AHashMap<NodeId, Position>) -> Self {
        Self { flow, positions }
    }

    /// Serializes the archive into its binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        encode_to_vec(StoredArchive::pack(self), standard())
            .map_err(|e| ArchiveError::Serialize(e.to_string()))
    }

    /// Writes the binary archive to a file.
    pub fn save(&self, path: &str) -> Result<(), ArchiveError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| ArchiveError::Write {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads a binary archive from a file.
    pub fn from_file(path: &str) -> Result<Self, ArchiveError> {
        let bytes = std::fs::read(path).map_err(|e| ArchiveError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Decodes a binary archive from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let (stored, _): (StoredArchive, _) = decode_from_slice(bytes, standard())
            .map_err(|e| ArchiveError::Deserialize(e.to_string()))?;
        Ok(stored.unpack())
    }

    /// Renders the archive as pretty-printed interchange JSON.
    pub fn to_json(&self) -> Result<String, ArchiveError> {
        serde_json::to_string_pretty(self).map_err(|e| ArchiveError::Serialize(e.to_string()))
    }

    /// Parses an archive from interchange JSON. A bare flow document is
    /// accepted too and gets an empty position map.
    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        if let Ok(archive) = serde_json::from_str::<FlowArchive>(json) {
            return Ok(archive);
        }
        let flow: Flow = serde_json::from_str(json)
            .map_err(|e| ArchiveError::Deserialize(e.to_string()))?;
        Ok(Self {
            flow,
            positions: AHashMap::new(),
        })
    }
}

// --- Binary storage schema ---
//
// The canonical action enum is kind-tagged on the wire, and only
// self-describing formats can decode that representation. Binary archives
// store these plain mirror types instead.

#[derive(Serialize, Deserialize)]
struct StoredArchive {
    root_id: NodeId,
    nodes: Vec<StoredNode>,
    positions: AHashMap<NodeId, Position>,
}

#[derive(Serialize, Deserialize)]
struct StoredNode {
    id: NodeId,
    label: String,
    description: Option<String>,
    action: StoredAction,
    children: Vec<NodeId>,
}

#[derive(Serialize, Deserialize)]
enum StoredAction {
    Message {
        text: String,
        attachment: Option<Attachment>,
        next: Option<NodeId>,
    },
    Menu {
        prompt: String,
        options: Vec<MenuOption>,
    },
    Question {
        prompt: String,
        save_as: Option<String>,
        next: Option<NodeId>,
    },
    Validation {
        input: Option<String>,
        on_valid: Option<NodeId>,
        on_invalid: Option<NodeId>,
    },
    Action {
        op: StoredOp,
        next: Option<NodeId>,
    },
    End,
}

#[derive(Serialize, Deserialize)]
enum StoredOp {
    Webhook { url: String },
    Assign { advisor: String },
    Tag { name: String },
}

impl StoredArchive {
    fn pack(archive: &FlowArchive) -> Self {
        Self {
            root_id: archive.flow.root_id.clone(),
            nodes: archive.flow.nodes.iter().map(StoredNode::pack).collect(),
            positions: archive.positions.clone(),
        }
    }

    fn unpack(self) -> FlowArchive {
        FlowArchive {
            flow: Flow {
                root_id: self.root_id,
                nodes: self.nodes.into_iter().map(StoredNode::unpack).collect(),
            },
            positions: self.positions,
        }
    }
}

impl StoredNode {
    fn pack(node: &FlowNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            description: node.description.clone(),
            action: StoredAction::pack(&node.action),
            children: node.children.clone(),
        }
    }

    fn unpack(self) -> FlowNode {
        FlowNode {
            id: self.id,
            label: self.label,
            description: self.description,
            action: self.action.unpack(),
            children: self.children,
        }
    }
}

impl StoredAction {
    fn pack(action: &NodeAction) -> Self {
        match action.clone() {
            NodeAction::Message {
                text,
                attachment,
                next,
            } => StoredAction::Message {
                text,
                attachment,
                next,
            },
            NodeAction::Menu { prompt, options } => StoredAction::Menu { prompt, options },
            NodeAction::Question {
                prompt,
                save_as,
                next,
            } => StoredAction::Question {
                prompt,
                save_as,
                next,
            },
            NodeAction::Validation {
                input,
                on_valid,
                on_invalid,
            } => StoredAction::Validation {
                input,
                on_valid,
                on_invalid,
            },
            NodeAction::Action { op, next } => StoredAction::Action {
                op: StoredOp::pack(op),
                next,
            },
            NodeAction::End => StoredAction::End,
        }
    }

    fn unpack(self) -> NodeAction {
        match self {
            StoredAction::Message {
                text,
                attachment,
                next,
            } => NodeAction::Message {
                text,
                attachment,
                next,
            },
            StoredAction::Menu { prompt, options } => NodeAction::Menu { prompt, options },
            StoredAction::Question {
                prompt,
                save_as,
                next,
            } => NodeAction::Question {
                prompt,
                save_as,
                next,
            },
            StoredAction::Validation {
                input,
                on_valid,
                on_invalid,
            } => NodeAction::Validation {
                input,
                on_valid,
                on_invalid,
            },
            StoredAction::Action { op, next } => NodeAction::Action {
                op: op.unpack(),
                next,
            },
            StoredAction::End => NodeAction::End,
        }
    }
}

impl StoredOp {
    fn pack(op: ActionOp) -> Self {
        match op {
            ActionOp::Webhook { url } => StoredOp::Webhook { url },
            ActionOp::Assign { advisor } => StoredOp::Assign { advisor },
            ActionOp::Tag { name } => StoredOp::Tag { name },
        }
    }

    fn unpack(self) -> ActionOp {
        match self {
            StoredOp::Webhook { url } => ActionOp::Webhook { url },
            StoredOp::Assign { advisor } => ActionOp::Assign { advisor },
            StoredOp::Tag { name } => ActionOp::Tag { name },
        }
    }
}
