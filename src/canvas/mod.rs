//! Interaction state machine for a flow canvas.
//!
//! The controller owns no document data. Every mutation and every
//! user-visible error goes through the [`CanvasHost`] callbacks, so the
//! same controller drives any host that can answer them: a desktop shell,
//! a web view, a headless test.

use crate::flow::{Attachment, HandleId, NodeId, NodeKind, Position};

/// Callback contract between the canvas and its embedding application.
///
/// The canvas never edits a flow itself. It translates gestures into these
/// calls and lets the host decide what actually happens; the host is also
/// the single place user-visible errors surface, via
/// [`CanvasHost::report_error`].
pub trait CanvasHost {
    /// Whether an edge from `source`'s output `handle` to `target` is
    /// allowed. Refused connections are reported, not silently ignored.
    fn can_connect(&self, source: &str, handle: &str, target: &str) -> bool;

    fn connect_handle(&mut self, source: &str, handle: &str, target: &str);

    fn disconnect_handle(&mut self, source: &str, handle: &str);

    /// Create a node of `kind`, wire `source`'s `handle` to it and place it
    /// at `at`. Backs the quick-create picker.
    fn create_for_handle(&mut self, source: &str, handle: &str, kind: NodeKind, at: Position);

    /// Create a node of `kind` wired to `parent`'s `handle`, placed by the
    /// automatic layout.
    fn add_child(&mut self, parent: &str, handle: &str, kind: NodeKind);

    fn delete_node(&mut self, id: &str);

    fn duplicate_node(&mut self, id: &str);

    fn attach_file(&mut self, id: &str, attachment: Attachment);

    /// Final positions of every node moved during a drag gesture, reported
    /// once when the gesture ends.
    fn positions_changed(&mut self, moved: &[(NodeId, Position)]);

    /// Single surface for user-visible problems.
    fn report_error(&mut self, message: &str);
}

/// An in-flight connection gesture: the output handle the user started
/// dragging from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    pub source: NodeId,
    pub handle: HandleId,
}

#[derive(Debug, Clone)]
struct QuickCreateState {
    connection: PendingConnection,
    at: Position,
}

/// Tracks the transient interaction state of one canvas: the connection
/// being dragged, the quick-create popover and the positions moved during
/// the current drag. All document effects are delegated to the host.
///
/// # Example
///
/// ```
/// use charla::canvas::{CanvasController, CanvasHost};
/// use charla::flow::{
///     Attachment, Flow, FlowEditor, FlowNode, NodeAction, NodeId, NodeKind, Position,
/// };
///
/// struct App {
///     editor: FlowEditor,
///     errors: Vec<String>,
/// }
///
/// impl CanvasHost for App {
///     fn can_connect(&self, source: &str, _handle: &str, target: &str) -> bool {
///         source != target && self.editor.flow().contains(target)
///     }
///     fn connect_handle(&mut self, source: &str, handle: &str, target: &str) {
///         if let Err(e) = self.editor.connect_handle(source, handle, target) {
///             self.errors.push(e.to_string());
///         }
///     }
///     fn report_error(&mut self, message: &str) {
///         self.errors.push(message.to_string());
///     }
/// #   fn disconnect_handle(&mut self, source: &str, handle: &str) {
/// #       let _ = self.editor.disconnect_handle(source, handle);
/// #   }
/// #   fn create_for_handle(&mut self, source: &str, handle: &str, kind: NodeKind, at: Position) {
/// #       if let Ok(id) = self.editor.add_child(source, handle, kind) {
/// #           self.editor.set_position(id, at);
/// #       }
/// #   }
/// #   fn add_child(&mut self, parent: &str, handle: &str, kind: NodeKind) {
/// #       let _ = self.editor.add_child(parent, handle, kind);
/// #   }
/// #   fn delete_node(&mut self, id: &str) {
/// #       let _ = self.editor.delete_node(id);
/// #   }
/// #   fn duplicate_node(&mut self, id: &str) {
/// #       let _ = self.editor.duplicate_node(id);
/// #   }
/// #   fn attach_file(&mut self, id: &str, attachment: Attachment) {
/// #       let _ = self.editor.attach_file(id, attachment);
/// #   }
/// #   fn positions_changed(&mut self, moved: &[(NodeId, Position)]) {
/// #       for (id, position) in moved {
/// #           self.editor.set_position(id.clone(), *position);
/// #       }
/// #   }
/// }
///
/// let mut flow = Flow::new(FlowNode::new(
///     "start",
///     "Welcome",
///     NodeAction::Message { text: "Hola!".into(), attachment: None, next: None },
/// ));
/// flow.nodes.push(FlowNode::new("bye", "Goodbye", NodeAction::End));
///
/// let app = App { editor: FlowEditor::new(flow), errors: Vec::new() };
/// let mut canvas = CanvasController::new(app);
///
/// // Drag from the root's "next" handle and drop it on the other node.
/// canvas.begin_connection("start", "next");
/// canvas.complete_connection("bye");
///
/// let (flow, _) = canvas.into_host().editor.into_parts();
/// assert_eq!(flow.node("start").unwrap().children, vec!["bye".to_string()]);
/// ```
#[derive(Debug)]
pub struct CanvasController<H: CanvasHost> {
    host: H,
    pending: Option<PendingConnection>,
    quick_create: Option<QuickCreateState>,
    drag: Vec<(NodeId, Position)>,
}

impl<H: CanvasHost> CanvasController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: None,
            quick_create: None,
            drag: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    // --- Connection Gestures ---

    /// Starts a connection drag from an output handle. Any previous
    /// gesture, including an open quick-create popover, is discarded.
    pub fn begin_connection(&mut self, source: impl Into<NodeId>, handle: impl Into<HandleId>) {
        self.quick_create = None;
        self.pending = Some(PendingConnection {
            source: source.into(),
            handle: handle.into(),
        });
    }

    /// The connection currently being dragged, if any.
    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    /// Drops the in-flight connection onto a node. The host predicate
    /// decides whether the edge is allowed; a refusal is reported through
    /// [`CanvasHost::report_error`]. Without an in-flight connection this
    /// is a no-op.
    pub fn complete_connection(&mut self, target: &str) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if self.host.can_connect(&pending.source, &pending.handle, target) {
            self.host
                .connect_handle(&pending.source, &pending.handle, target);
        } else {
            self.host.report_error(&format!(
                "Cannot connect '{}' ({}) to '{}'",
                pending.source, pending.handle, target
            ));
        }
    }

    /// Drops the in-flight connection on empty canvas, which opens the
    /// quick-create popover at that point instead of discarding the
    /// gesture.
    pub fn release_on_canvas(&mut self, at: Position) {
        if let Some(connection) = self.pending.take() {
            self.quick_create = Some(QuickCreateState { connection, at });
        }
    }

    /// Where the quick-create popover is open, if it is.
    pub fn quick_create_at(&self) -> Option<Position> {
        self.quick_create.as_ref().map(|state| state.at)
    }

    /// Picks a node kind in the quick-create popover: the host creates the
    /// node at the drop point, already wired to the handle the gesture
    /// started from. Without an open popover this is a no-op.
    pub fn quick_create(&mut self, kind: NodeKind) {
        let Some(state) = self.quick_create.take() else {
            return;
        };
        self.host.create_for_handle(
            &state.connection.source,
            &state.connection.handle,
            kind,
            state.at,
        );
    }

    /// Discards the in-flight connection and the quick-create popover.
    /// Bound to ESC and to clicks outside the popover.
    pub fn cancel_interaction(&mut self) {
        self.pending = None;
        self.quick_create = None;
    }

    // --- Node Gestures ---

    /// Records an intermediate position while a node is being dragged.
    /// Repeated moves of the same node coalesce to the latest position.
    pub fn drag_node(&mut self, id: impl Into<NodeId>, position: Position) {
        let id = id.into();
        match self.drag.iter_mut().find(|(moved, _)| *moved == id) {
            Some(entry) => entry.1 = position,
            None => self.drag.push((id, position)),
        }
    }

    /// Ends the drag gesture, reporting all moved nodes to the host in one
    /// batch. Ending a drag that never moved anything reports nothing.
    pub fn end_drag(&mut self) {
        if self.drag.is_empty() {
            return;
        }
        let moved = std::mem::take(&mut self.drag);
        self.host.positions_changed(&moved);
    }

    /// Asks the host to delete a node. A gesture anchored on the deleted
    /// node is discarded with it.
    pub fn request_delete(&mut self, id: &str) {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.source == id)
        {
            self.pending = None;
        }
        if self
            .quick_create
            .as_ref()
            .is_some_and(|state| state.connection.source == id)
        {
            self.quick_create = None;
        }
        self.drag.retain(|(moved, _)| moved != id);
        self.host.delete_node(id);
    }

    pub fn request_duplicate(&mut self, id: &str) {
        self.host.duplicate_node(id);
    }

    pub fn request_add_child(&mut self, parent: &str, handle: &str, kind: NodeKind) {
        self.host.add_child(parent, handle, kind);
    }

    pub fn request_attach(&mut self, id: &str, attachment: Attachment) {
        self.host.attach_file(id, attachment);
    }

    /// Removes an existing edge by clearing its source handle.
    pub fn remove_edge(&mut self, source: &str, handle: &str) {
        self.host.disconnect_handle(source, handle);
    }
}
