use rackplan_designer::{
    DocumentStore, EditError, Element, ElementId, Envelope, InMemoryDocument, LayoutEditor,
    Position, SnapTarget, ToolState, WarningKind,
};

fn aisle_layout() -> InMemoryDocument {
    InMemoryDocument::with_elements(
        Envelope::new(40.0, 25.0, 10.0),
        vec![
            Element::shelf("a", 0.0, 0.0, 2.7, 1.1),
            Element::shelf("b", 10.0, 0.0, 2.7, 1.1),
        ],
    )
}

#[test]
fn test_drag_into_narrow_aisle_raises_warning_live() {
    let mut doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Move);
    let id = ElementId::from("b");
    editor.begin_drag(&doc, &id, Position::new(10.0, 0.0)).unwrap();

    editor.drag_to(&mut doc, 4.7, 0.0).unwrap();
    assert!(editor
        .warnings()
        .iter()
        .any(|w| w.kind == WarningKind::AisleNarrow));

    editor.end_drag(&doc).unwrap();
    editor.undo(&mut doc).unwrap();
    assert_eq!(doc.get_element_by_id(&id).unwrap().position.x, 10.0);
    assert!(editor
        .warnings()
        .iter()
        .all(|w| w.kind != WarningKind::AisleNarrow));
}

#[test]
fn test_ortho_toggle_locks_to_dominant_axis() {
    let mut doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.toggle_ortho();
    editor.set_tool(ToolState::Move);
    let id = ElementId::from("b");
    editor
        .begin_drag(&doc, &id, Position::new(10.0, 0.0))
        .unwrap();

    let result = editor.drag_to(&mut doc, 10.4, 7.7).unwrap();
    assert_eq!(result.snapped_to, Some(SnapTarget::Ortho));
    assert_eq!(result.x, 10.0);
    assert_eq!(result.z, 8.0);
}

#[test]
fn test_drag_without_movement_records_nothing() {
    let doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Move);
    editor
        .begin_drag(&doc, &ElementId::from("a"), Position::new(1.0, 0.5))
        .unwrap();
    assert!(!editor.end_drag(&doc).unwrap());
    assert!(!editor.can_undo());
}

#[test]
fn test_tool_change_abandons_drag() {
    let mut doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Move);
    editor
        .begin_drag(&doc, &ElementId::from("a"), Position::new(0.0, 0.0))
        .unwrap();
    assert!(editor.set_tool(ToolState::Pan));
    assert_eq!(
        editor.drag_to(&mut doc, 3.0, 3.0),
        Err(EditError::NoActiveDrag)
    );
    assert!(editor.guides().is_empty());
}

#[test]
fn test_tool_change_waits_for_moved_drag() {
    let mut doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Move);
    let id = ElementId::from("a");
    editor.begin_drag(&doc, &id, Position::new(0.0, 0.0)).unwrap();
    editor.drag_to(&mut doc, 5.0, 6.0).unwrap();
    assert_ne!(doc.get_element_by_id(&id).unwrap().position, Position::new(0.0, 0.0));

    assert!(!editor.set_tool(ToolState::Pan));
    assert!(!editor.escape());
    assert_eq!(editor.tool(), ToolState::Move);
    assert!(editor.is_dragging());

    editor.cancel_drag(&mut doc).unwrap();
    assert_eq!(doc.get_element_by_id(&id).unwrap().position, Position::new(0.0, 0.0));
    assert!(!editor.can_undo());
    assert!(editor.set_tool(ToolState::Pan));
}

#[test]
fn test_measure_tool() {
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Measure);
    assert!(editor.begin_measure(Position::new(2.7, 0.0)));
    let m = editor.update_measure(Position::new(10.0, 0.0)).unwrap();
    assert!((m.distance() - 7.3).abs() < 1e-9);
    assert_eq!(m.dz(), 0.0);
}

#[test]
fn test_draw_preview_snaps_and_clears_on_place() {
    let mut doc = aisle_layout();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::DrawDock);
    let result = editor.update_preview(20.2, 24.8, &doc);
    assert_eq!(result.z, 25.0);
    assert!(editor.tools().preview().is_some());

    editor.place_element(&mut doc, 20.2, 24.8).unwrap();
    assert!(editor.tools().preview().is_none());
    assert_eq!(doc.len(), 3);
}
