use rackplan_designer::{
    register_keyboard_shortcuts, DocumentStore, Element, ElementId, Envelope, InMemoryDocument,
    Key, KeyEvent, KeyboardHub, LayoutEditor, ToolState,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_shortcut_session() {
    let hub = Rc::new(KeyboardHub::new());
    let editor = Rc::new(RefCell::new(LayoutEditor::new()));
    let doc = Rc::new(RefCell::new(InMemoryDocument::with_elements(
        Envelope::default(),
        vec![Element::shelf("s1", 5.0, 5.0, 2.7, 1.1)],
    )));
    let mut registration = register_keyboard_shortcuts(&hub, editor.clone(), doc.clone());

    for (key, tool) in [
        ('s', ToolState::DrawShelf),
        ('d', ToolState::DrawDock),
        ('o', ToolState::DrawOffice),
        ('z', ToolState::DrawZone),
        ('e', ToolState::Erase),
        ('t', ToolState::Measure),
        ('h', ToolState::Pan),
        ('r', ToolState::Rotate),
        ('v', ToolState::Select),
    ] {
        assert!(hub.dispatch(&KeyEvent::press(Key::Char(key))));
        assert_eq!(editor.borrow().tool(), tool);
    }

    hub.dispatch(&KeyEvent::press(Key::Char('g')));
    assert!(!editor.borrow().grid_visible());

    editor.borrow_mut().select(ElementId::from("s1"), false);
    hub.dispatch(&KeyEvent::press(Key::Char('d')).with_ctrl());
    assert_eq!(doc.borrow().len(), 2);

    hub.dispatch(&KeyEvent::press(Key::Backspace));
    assert_eq!(doc.borrow().len(), 1);

    hub.dispatch(&KeyEvent::press(Key::Char('z')).with_ctrl());
    assert_eq!(doc.borrow().len(), 2);
    hub.dispatch(&KeyEvent::press(Key::Char('y')).with_ctrl());
    assert_eq!(doc.borrow().len(), 1);

    registration.dispose();
    assert!(!hub.dispatch(&KeyEvent::press(Key::Char('m'))));
    assert!(doc.borrow().get_element_by_id(&ElementId::from("s1")).is_some());
}

#[test]
fn test_failed_shortcut_is_still_consumed() {
    let hub = Rc::new(KeyboardHub::new());
    let editor = Rc::new(RefCell::new(LayoutEditor::new()));
    let doc = Rc::new(RefCell::new(InMemoryDocument::new(Envelope::default())));
    let _registration = register_keyboard_shortcuts(&hub, editor.clone(), doc);

    // Paste with an empty clipboard logs and consumes the key.
    assert!(hub.dispatch(&KeyEvent::press(Key::Char('v')).with_ctrl()));
    assert!(!editor.borrow().can_undo());
}

#[test]
fn test_busy_editor_drops_event() {
    let hub = Rc::new(KeyboardHub::new());
    let editor = Rc::new(RefCell::new(LayoutEditor::new()));
    let doc = Rc::new(RefCell::new(InMemoryDocument::new(Envelope::default())));
    let _registration = register_keyboard_shortcuts(&hub, editor.clone(), doc);

    let _guard = editor.borrow_mut();
    assert!(!hub.dispatch(&KeyEvent::press(Key::Char('m'))));
}
