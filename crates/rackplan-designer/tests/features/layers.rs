use rackplan_designer::{
    EditError, Element, ElementId, ElementType, Envelope, InMemoryDocument, LayerCategory,
    LayoutEditor, Position, ToolState,
};
use std::f64::consts::FRAC_PI_2;

#[test]
fn test_lock_gates_only_its_own_category() {
    let mut doc = InMemoryDocument::with_elements(
        Envelope::default(),
        vec![
            Element::office("office", 0.0, 10.0, 6.0, 4.0),
            Element::service("wc", 10.0, 10.0, 3.0, 3.0),
        ],
    );
    let mut editor = LayoutEditor::new();
    editor.layers_mut().toggle_lock(LayerCategory::Offices);
    assert!(editor.is_element_locked(ElementType::Office));
    assert!(!editor.is_element_locked(ElementType::Service));

    editor.set_tool(ToolState::Rotate);
    let err = editor
        .rotate_element(&mut doc, &ElementId::from("office"), FRAC_PI_2)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Layer 'offices' is locked; cannot rotate element office"
    );

    editor.set_tool(ToolState::Move);
    editor
        .move_element(&mut doc, &ElementId::from("wc"), Position::new(12.0, 10.0))
        .unwrap();
    assert_eq!(doc.elements[1].position.x, 12.0);
}

#[test]
fn test_hidden_layer_is_not_pickable() {
    let doc = InMemoryDocument::with_elements(
        Envelope::default(),
        vec![
            Element::zone("zone", 0.0, 0.0, 10.0, 10.0),
            Element::shelf("shelf", 2.0, 2.0, 2.7, 1.1),
        ],
    );
    let mut editor = LayoutEditor::new();
    assert_eq!(
        editor.select_at(&doc, 3.0, 2.5, false),
        Some(ElementId::from("shelf"))
    );

    editor.layers_mut().set_visible(LayerCategory::Shelves, false);
    assert!(!editor.is_element_visible(ElementType::Shelf));
    assert_eq!(
        editor.select_at(&doc, 3.0, 2.5, false),
        Some(ElementId::from("zone"))
    );
}

#[test]
fn test_erase_in_locked_layer_keeps_document() {
    let mut doc = InMemoryDocument::with_elements(
        Envelope::default(),
        vec![Element::dock("dock", 5.0, 0.0, 3.5)],
    );
    let mut editor = LayoutEditor::new();
    editor.layers_mut().set_locked(LayerCategory::Docks, true);
    editor.set_tool(ToolState::Erase);
    assert!(matches!(
        editor.erase_element(&mut doc, &ElementId::from("dock")),
        Err(EditError::LayerLocked { .. })
    ));
    assert_eq!(doc.len(), 1);
}
