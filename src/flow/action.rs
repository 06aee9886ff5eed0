use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::NodeId;

/// Discriminant of a node's action payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Message,
    Menu,
    Question,
    Validation,
    Action,
    End,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Message => "message",
            NodeKind::Menu => "menu",
            NodeKind::Question => "question",
            NodeKind::Validation => "validation",
            NodeKind::Action => "action",
            NodeKind::End => "end",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media attachment carried by a message node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// One selectable option of a menu node. Each option is an output handle
/// that may point to at most one child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub next: Option<NodeId>,
}

/// Side effect performed by an action node when the conversation reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionOp {
    Webhook { url: String },
    Assign { advisor: String },
    Tag { name: String },
}

/// The behavior payload of a flow node, keyed by `kind` on the wire.
///
/// Branch targets live inside the payload (a menu option's `next`, a
/// validation's `on_valid`/`on_invalid`); the node's `children` list is
/// derived from them. The handle ids produced by [`NodeAction::handle_specs`]
/// are the stable names the canvas uses to address each output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeAction {
    Message {
        #[serde(default)]
        text: String,
        #[serde(default)]
        attachment: Option<Attachment>,
        #[serde(default)]
        next: Option<NodeId>,
    },
    Menu {
        #[serde(default)]
        prompt: String,
        #[serde(default)]
        options: Vec<MenuOption>,
    },
    Question {
        #[serde(default)]
        prompt: String,
        #[serde(default)]
        save_as: Option<String>,
        #[serde(default)]
        next: Option<NodeId>,
    },
    Validation {
        #[serde(default)]
        input: Option<String>,
        #[serde(default)]
        on_valid: Option<NodeId>,
        #[serde(default)]
        on_invalid: Option<NodeId>,
    },
    Action {
        op: ActionOp,
        #[serde(default)]
        next: Option<NodeId>,
    },
    End,
}

/// Identifier of an output handle on a node (`"next"`, `"option-2"`, ...).
pub type HandleId = String;

/// A named output handle derived from a node's action payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandleSpec {
    pub id: HandleId,
    pub label: String,
}

impl NodeAction {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeAction::Message { .. } => NodeKind::Message,
            NodeAction::Menu { .. } => NodeKind::Menu,
            NodeAction::Question { .. } => NodeKind::Question,
            NodeAction::Validation { .. } => NodeKind::Validation,
            NodeAction::Action { .. } => NodeKind::Action,
            NodeAction::End => NodeKind::End,
        }
    }

    /// An empty payload of the given kind, used when instantiating nodes
    /// from the canvas quick-create picker.
    pub fn default_for(kind: NodeKind) -> NodeAction {
        match kind {
            NodeKind::Message => NodeAction::Message {
                text: String::new(),
                attachment: None,
                next: None,
            },
            NodeKind::Menu => NodeAction::Menu {
                prompt: String::new(),
                options: Vec::new(),
            },
            NodeKind::Question => NodeAction::Question {
                prompt: String::new(),
                save_as: None,
                next: None,
            },
            NodeKind::Validation => NodeAction::Validation {
                input: None,
                on_valid: None,
                on_invalid: None,
            },
            NodeKind::Action => NodeAction::Action {
                op: ActionOp::Tag {
                    name: String::new(),
                },
                next: None,
            },
            NodeKind::End => NodeAction::End,
        }
    }

    /// Output handles this payload exposes, in display order.
    pub fn handle_specs(&self) -> Vec<HandleSpec> {
        match self {
            NodeAction::Message { .. } | NodeAction::Action { .. } => vec![HandleSpec {
                id: "next".to_string(),
                label: "Next".to_string(),
            }],
            NodeAction::Question { .. } => vec![HandleSpec {
                id: "next".to_string(),
                label: "Answer".to_string(),
            }],
            NodeAction::Menu { options, .. } => options
                .iter()
                .enumerate()
                .map(|(index, option)| HandleSpec {
                    id: format!("option-{}", index),
                    label: option.label.clone(),
                })
                .collect(),
            NodeAction::Validation { .. } => vec![
                HandleSpec {
                    id: "valid".to_string(),
                    label: "Valid".to_string(),
                },
                HandleSpec {
                    id: "invalid".to_string(),
                    label: "Invalid".to_string(),
                },
            ],
            NodeAction::End => Vec::new(),
        }
    }

    /// `(handle id, current target)` pairs, in the same order as
    /// [`NodeAction::handle_specs`]. Targets are whatever the document says,
    /// including ids that no longer exist.
    pub fn assignments(&self) -> Vec<(HandleId, Option<NodeId>)> {
        match self {
            NodeAction::Message { next, .. }
            | NodeAction::Question { next, .. }
            | NodeAction::Action { next, .. } => vec![("next".to_string(), next.clone())],
            NodeAction::Menu { options, .. } => options
                .iter()
                .enumerate()
                .map(|(index, option)| (format!("option-{}", index), option.next.clone()))
                .collect(),
            NodeAction::Validation {
                on_valid,
                on_invalid,
                ..
            } => vec![
                ("valid".to_string(), on_valid.clone()),
                ("invalid".to_string(), on_invalid.clone()),
            ],
            NodeAction::End => Vec::new(),
        }
    }

    /// Child ids this payload currently points to, first occurrence wins.
    /// This is the canonical content of a node's `children` list.
    pub fn child_list(&self) -> Vec<NodeId> {
        let mut children = Vec::new();
        for (_, target) in self.assignments() {
            if let Some(target) = target {
                if !children.contains(&target) {
                    children.push(target);
                }
            }
        }
        children
    }

    /// Mutable target slot behind an output handle, if the handle exists on
    /// this payload. Menu handles are addressed as `option-<index>`.
    pub(crate) fn target_slot_mut(&mut self, handle: &str) -> Option<&mut Option<NodeId>> {
        match self {
            NodeAction::Message { next, .. }
            | NodeAction::Question { next, .. }
            | NodeAction::Action { next, .. } => (handle == "next").then_some(next),
            NodeAction::Menu { options, .. } => {
                let index = parse_option_index(handle)?;
                options.get_mut(index).map(|option| &mut option.next)
            }
            NodeAction::Validation {
                on_valid,
                on_invalid,
                ..
            } => match handle {
                "valid" => Some(on_valid),
                "invalid" => Some(on_invalid),
                _ => None,
            },
            NodeAction::End => None,
        }
    }

    /// Clears every branch target, leaving the rest of the payload intact.
    pub(crate) fn clear_targets(&mut self) {
        match self {
            NodeAction::Message { next, .. }
            | NodeAction::Question { next, .. }
            | NodeAction::Action { next, .. } => *next = None,
            NodeAction::Menu { options, .. } => {
                for option in options {
                    option.next = None;
                }
            }
            NodeAction::Validation {
                on_valid,
                on_invalid,
                ..
            } => {
                *on_valid = None;
                *on_invalid = None;
            }
            NodeAction::End => {}
        }
    }
}

/// Parses the index out of an `option-<index>` handle id.
fn parse_option_index(handle: &str) -> Option<usize> {
    handle.strip_prefix("option-")?.parse().ok()
}
