//! Tests for the canvas controller and its host callback contract.
use charla::prelude::*;

/// A host that records every callback as a readable line, with a
/// configurable connection predicate.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<String>,
    refuse_connections: bool,
}

impl CanvasHost for RecordingHost {
    fn can_connect(&self, _source: &str, _handle: &str, _target: &str) -> bool {
        !self.refuse_connections
    }

    fn connect_handle(&mut self, source: &str, handle: &str, target: &str) {
        self.calls.push(format!("connect {}:{}->{}", source, handle, target));
    }

    fn disconnect_handle(&mut self, source: &str, handle: &str) {
        self.calls.push(format!("disconnect {}:{}", source, handle));
    }

    fn create_for_handle(&mut self, source: &str, handle: &str, kind: NodeKind, at: Position) {
        self.calls.push(format!(
            "create {}:{} {} at ({}, {})",
            source, handle, kind, at.x, at.y
        ));
    }

    fn add_child(&mut self, parent: &str, handle: &str, kind: NodeKind) {
        self.calls.push(format!("add {}:{} {}", parent, handle, kind));
    }

    fn delete_node(&mut self, id: &str) {
        self.calls.push(format!("delete {}", id));
    }

    fn duplicate_node(&mut self, id: &str) {
        self.calls.push(format!("duplicate {}", id));
    }

    fn attach_file(&mut self, id: &str, attachment: Attachment) {
        self.calls.push(format!("attach {} {}", id, attachment.name));
    }

    fn positions_changed(&mut self, moved: &[(NodeId, Position)]) {
        let entries: Vec<String> = moved
            .iter()
            .map(|(id, position)| format!("{}@({}, {})", id, position.x, position.y))
            .collect();
        self.calls.push(format!("moved {}", entries.join(" ")));
    }

    fn report_error(&mut self, message: &str) {
        self.calls.push(format!("error: {}", message));
    }
}

fn controller() -> CanvasController<RecordingHost> {
    CanvasController::new(RecordingHost::default())
}

#[test]
fn test_completing_a_connection_calls_the_host() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    assert!(canvas.pending_connection().is_some());

    canvas.complete_connection("advisor");
    assert_eq!(canvas.host().calls, vec!["connect plans:next->advisor"]);
    assert!(canvas.pending_connection().is_none());
}

#[test]
fn test_refused_connections_surface_one_error() {
    let mut canvas = controller();
    canvas.host_mut().refuse_connections = true;

    canvas.begin_connection("plans", "next");
    canvas.complete_connection("advisor");

    assert_eq!(
        canvas.host().calls,
        vec!["error: Cannot connect 'plans' (next) to 'advisor'"]
    );
    assert!(canvas.pending_connection().is_none());
}

#[test]
fn test_completing_without_a_gesture_is_a_noop() {
    let mut canvas = controller();
    canvas.complete_connection("advisor");
    assert!(canvas.host().calls.is_empty());
}

#[test]
fn test_release_on_canvas_opens_quick_create() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    canvas.release_on_canvas(Position::new(640.0, 480.0));

    // The gesture moved into the popover.
    assert!(canvas.pending_connection().is_none());
    assert_eq!(canvas.quick_create_at(), Some(Position::new(640.0, 480.0)));

    canvas.quick_create(NodeKind::Menu);
    assert_eq!(
        canvas.host().calls,
        vec!["create plans:next menu at (640, 480)"]
    );
    assert!(canvas.quick_create_at().is_none());
}

#[test]
fn test_release_without_a_gesture_opens_nothing() {
    let mut canvas = controller();
    canvas.release_on_canvas(Position::new(0.0, 0.0));
    assert!(canvas.quick_create_at().is_none());

    canvas.quick_create(NodeKind::Message);
    assert!(canvas.host().calls.is_empty());
}

#[test]
fn test_cancel_dismisses_everything() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    canvas.cancel_interaction();
    assert!(canvas.pending_connection().is_none());

    canvas.begin_connection("plans", "next");
    canvas.release_on_canvas(Position::new(1.0, 2.0));
    canvas.cancel_interaction();
    assert!(canvas.quick_create_at().is_none());

    canvas.complete_connection("advisor");
    assert!(canvas.host().calls.is_empty());
}

#[test]
fn test_starting_a_new_gesture_closes_the_popover() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    canvas.release_on_canvas(Position::new(1.0, 2.0));
    canvas.begin_connection("advisor", "next");

    assert!(canvas.quick_create_at().is_none());
    assert!(canvas.pending_connection().is_some());
}

#[test]
fn test_drags_coalesce_into_one_batch() {
    let mut canvas = controller();

    canvas.drag_node("a", Position::new(1.0, 1.0));
    canvas.drag_node("b", Position::new(2.0, 2.0));
    canvas.drag_node("a", Position::new(5.0, 5.0));
    canvas.end_drag();

    // One callback, latest position per node, first-move order.
    assert_eq!(canvas.host().calls, vec!["moved a@(5, 5) b@(2, 2)"]);

    // Ending an empty drag reports nothing.
    canvas.end_drag();
    assert_eq!(canvas.host().calls.len(), 1);
}

#[test]
fn test_deleting_a_node_discards_its_gestures() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    canvas.drag_node("plans", Position::new(9.0, 9.0));
    canvas.request_delete("plans");

    assert!(canvas.pending_connection().is_none());
    assert_eq!(canvas.host().calls, vec!["delete plans"]);

    // The dropped drag entry must not resurface later.
    canvas.end_drag();
    assert_eq!(canvas.host().calls, vec!["delete plans"]);
}

#[test]
fn test_deleting_an_unrelated_node_keeps_the_gesture() {
    let mut canvas = controller();

    canvas.begin_connection("plans", "next");
    canvas.request_delete("advisor");

    assert!(canvas.pending_connection().is_some());
    assert_eq!(canvas.host().calls, vec!["delete advisor"]);
}

#[test]
fn test_request_helpers_delegate_to_the_host() {
    let mut canvas = controller();

    canvas.request_add_child("root", "option-0", NodeKind::Question);
    canvas.request_duplicate("plans");
    canvas.remove_edge("plans", "next");
    canvas.request_attach(
        "plans",
        Attachment {
            name: "flyer.png".to_string(),
            url: "https://cdn.example.com/flyer.png".to_string(),
        },
    );

    assert_eq!(
        canvas.host().calls,
        vec![
            "add root:option-0 question",
            "duplicate plans",
            "disconnect plans:next",
            "attach plans flyer.png",
        ]
    );
}
