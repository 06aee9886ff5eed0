use ahash::AHashMap;

use super::action::{Attachment, NodeAction, NodeKind};
use super::document::{Flow, FlowNode, NodeId, Position};
use crate::error::EditError;

/// Monotonic id generator owned by an editor instance. Ids are minted as
/// `<prefix>-<counter>`; the editor skips values already taken by the
/// document, so loading an older flow can never produce a duplicate id.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 1,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = format!("{}-{}", self.prefix, self.counter);
        self.counter += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("node")
    }
}

/// Stateful editor for one flow document.
///
/// The editor owns the document, the map of user-dragged positions and the
/// id generator, and keeps every node's `children` list in step with its
/// action's branch targets after each mutation. All edits are reported
/// through [`EditError`]; the document is left untouched when an edit is
/// rejected.
#[derive(Debug, Clone)]
pub struct FlowEditor {
    flow: Flow,
    positions: AHashMap<NodeId, Position>,
    ids: IdGenerator,
}

impl FlowEditor {
    pub fn new(flow: Flow) -> Self {
        Self::with_id_generator(flow, IdGenerator::default())
    }

    pub fn with_id_generator(flow: Flow, ids: IdGenerator) -> Self {
        Self {
            flow,
            positions: AHashMap::new(),
            ids,
        }
    }

    /// Restores previously saved drag positions, replacing the current map.
    pub fn set_positions(&mut self, positions: AHashMap<NodeId, Position>) {
        self.positions = positions;
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn positions(&self) -> &AHashMap<NodeId, Position> {
        &self.positions
    }

    /// Consumes the editor, returning the document and the position map.
    pub fn into_parts(self) -> (Flow, AHashMap<NodeId, Position>) {
        (self.flow, self.positions)
    }

    // --- Node Operations ---

    /// Creates a new node of the given kind and wires `parent`'s output
    /// handle to it. Returns the new node's id.
    pub fn add_child(
        &mut self,
        parent: &str,
        handle: &str,
        kind: NodeKind,
    ) -> Result<NodeId, EditError> {
        let parent_node = self
            .flow
            .node(parent)
            .ok_or_else(|| EditError::NodeNotFound(parent.to_string()))?;
        if !parent_node
            .action
            .assignments()
            .iter()
            .any(|(id, _)| id == handle)
        {
            return Err(EditError::HandleNotFound {
                node_id: parent.to_string(),
                handle: handle.to_string(),
            });
        }

        let id = self.alloc_id();
        let node = FlowNode::new(id.clone(), default_label(kind), NodeAction::default_for(kind));
        self.flow.nodes.push(node);
        self.connect_handle(parent, handle, &id)?;
        Ok(id)
    }

    /// Removes a node and clears every handle that pointed at it. Children
    /// of the deleted node stay in the document; the validator reports them
    /// if they become unreachable. The root node cannot be deleted.
    pub fn delete_node(&mut self, id: &str) -> Result<(), EditError> {
        if id == self.flow.root_id {
            return Err(EditError::RootDeletion);
        }
        if !self.flow.contains(id) {
            return Err(EditError::NodeNotFound(id.to_string()));
        }

        self.flow.nodes.retain(|node| node.id != id);
        for node in &mut self.flow.nodes {
            let stale: Vec<String> = node
                .action
                .assignments()
                .into_iter()
                .filter(|(_, target)| target.as_deref() == Some(id))
                .map(|(handle, _)| handle)
                .collect();
            for handle in stale {
                if let Some(slot) = node.action.target_slot_mut(&handle) {
                    *slot = None;
                }
            }
            node.children = node.action.child_list();
        }
        self.positions.remove(id);
        Ok(())
    }

    /// Clones a node under a fresh id with all branch targets cleared, so
    /// the copy starts without outgoing or incoming connections.
    pub fn duplicate_node(&mut self, id: &str) -> Result<NodeId, EditError> {
        let index = self
            .flow
            .nodes
            .iter()
            .position(|node| node.id == id)
            .ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;

        let new_id = self.alloc_id();
        let source = &self.flow.nodes[index];
        let mut action = source.action.clone();
        action.clear_targets();
        let copy = FlowNode {
            id: new_id.clone(),
            label: format!("{} (copy)", source.label),
            description: source.description.clone(),
            action,
            children: Vec::new(),
        };
        self.flow.nodes.insert(index + 1, copy);

        if let Some(position) = self.positions.get(id).copied() {
            self.positions
                .insert(new_id.clone(), Position::new(position.x + 40.0, position.y + 40.0));
        }
        Ok(new_id)
    }

    // --- Connections ---

    /// Points `source`'s output handle at `target`, replacing whatever the
    /// handle pointed at before.
    pub fn connect_handle(
        &mut self,
        source: &str,
        handle: &str,
        target: &str,
    ) -> Result<(), EditError> {
        if source == target {
            return Err(EditError::SelfConnection(source.to_string()));
        }
        if !self.flow.contains(target) {
            return Err(EditError::NodeNotFound(target.to_string()));
        }
        let node = self
            .flow
            .node_mut(source)
            .ok_or_else(|| EditError::NodeNotFound(source.to_string()))?;
        let slot = node
            .action
            .target_slot_mut(handle)
            .ok_or_else(|| EditError::HandleNotFound {
                node_id: source.to_string(),
                handle: handle.to_string(),
            })?;
        *slot = Some(target.to_string());
        node.children = node.action.child_list();
        Ok(())
    }

    /// Clears `source`'s output handle. Clearing an already empty handle is
    /// not an error.
    pub fn disconnect_handle(&mut self, source: &str, handle: &str) -> Result<(), EditError> {
        let node = self
            .flow
            .node_mut(source)
            .ok_or_else(|| EditError::NodeNotFound(source.to_string()))?;
        let slot = node
            .action
            .target_slot_mut(handle)
            .ok_or_else(|| EditError::HandleNotFound {
                node_id: source.to_string(),
                handle: handle.to_string(),
            })?;
        *slot = None;
        node.children = node.action.child_list();
        Ok(())
    }

    // --- Content ---

    /// Attaches a media file to a message node. Other node kinds reject
    /// attachments.
    pub fn attach_file(&mut self, id: &str, attachment: Attachment) -> Result<(), EditError> {
        let node = self
            .flow
            .node_mut(id)
            .ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;
        match &mut node.action {
            NodeAction::Message {
                attachment: slot, ..
            } => {
                *slot = Some(attachment);
                Ok(())
            }
            other => Err(EditError::AttachmentNotSupported {
                node_id: id.to_string(),
                kind: other.kind().to_string(),
            }),
        }
    }

    // --- Positions ---

    /// Records a user-dragged position for a node. Entries for unknown ids
    /// are stored as-is and simply never rendered.
    pub fn set_position(&mut self, id: impl Into<NodeId>, position: Position) {
        self.positions.insert(id.into(), position);
    }

    /// Drops the dragged position, letting the automatic layout place the
    /// node again.
    pub fn clear_position(&mut self, id: &str) {
        self.positions.remove(id);
    }

    fn alloc_id(&mut self) -> NodeId {
        loop {
            let id = self.ids.next_id();
            if !self.flow.contains(&id) {
                return id;
            }
        }
    }
}

/// Display label given to freshly created nodes.
fn default_label(kind: NodeKind) -> String {
    match kind {
        NodeKind::Message => "New message",
        NodeKind::Menu => "New menu",
        NodeKind::Question => "New question",
        NodeKind::Validation => "New validation",
        NodeKind::Action => "New action",
        NodeKind::End => "End",
    }
    .to_string()
}
