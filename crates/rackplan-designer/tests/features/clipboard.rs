use rackplan_designer::{
    DocumentStore, EditError, Element, ElementId, Envelope, InMemoryDocument, LayerCategory,
    LayoutEditor, Position, ToolState,
};

fn warehouse() -> InMemoryDocument {
    InMemoryDocument::with_elements(
        Envelope::new(30.0, 20.0, 10.0),
        vec![
            Element::shelf("s1", 1.0, 1.0, 2.7, 1.1),
            Element::shelf("s2", 1.0, 5.0, 2.7, 1.1),
            Element::zone("z1", 20.0, 10.0, 5.0, 5.0),
        ],
    )
}

#[test]
fn test_paste_into_locked_layer_is_refused() {
    let mut doc = warehouse();
    let mut editor = LayoutEditor::new();
    editor.select(ElementId::from("z1"), false);
    editor.copy_selected(&doc).unwrap();
    editor.layers_mut().set_locked(LayerCategory::Zones, true);

    let err = editor.paste(&mut doc).unwrap_err();
    assert!(matches!(err, EditError::LayerLocked { .. }));
    assert_eq!(doc.len(), 3);
}

#[test]
fn test_pasted_elements_are_revalidated() {
    let mut doc = warehouse();
    let mut editor = LayoutEditor::new();
    editor.select(ElementId::from("s1"), false);
    editor.copy_selected(&doc).unwrap();
    editor.paste(&mut doc).unwrap();

    // Copy lands one metre down and right, overlapping the original.
    let collisions = editor
        .warnings()
        .iter()
        .filter(|w| w.kind == rackplan_designer::WarningKind::Collision)
        .count();
    assert_eq!(collisions, 1);
}

#[test]
fn test_place_then_undo_removes_element() {
    let mut doc = warehouse();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::DrawShelf);
    let id = editor.place_element(&mut doc, 10.2, 14.9).unwrap();
    assert_eq!(
        doc.get_element_by_id(&id).unwrap().position,
        Position::new(10.0, 15.0)
    );

    editor.undo(&mut doc).unwrap();
    assert!(doc.get_element_by_id(&id).is_none());
    editor.redo(&mut doc).unwrap();
    assert!(doc.get_element_by_id(&id).is_some());
}

#[test]
fn test_new_edit_after_undo_discards_redo() {
    let mut doc = warehouse();
    let mut editor = LayoutEditor::new();
    editor.set_tool(ToolState::Move);
    editor
        .move_element(&mut doc, &ElementId::from("s1"), Position::new(8.0, 1.0))
        .unwrap();
    editor.undo(&mut doc);
    assert!(editor.can_redo());

    editor
        .move_element(&mut doc, &ElementId::from("s2"), Position::new(8.0, 5.0))
        .unwrap();
    assert!(!editor.can_redo());
    assert_eq!(
        doc.get_element_by_id(&ElementId::from("s1")).unwrap().position,
        Position::new(1.0, 1.0)
    );
}
