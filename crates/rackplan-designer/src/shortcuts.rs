//! Keyboard shortcuts.
//!
//! Key events are dispatched through a [`KeyboardHub`]. The editor's
//! shortcut table is one subscription on that hub; the returned
//! [`ShortcutRegistration`] removes it again when disposed or dropped.

use crate::document::DocumentStore;
use crate::editor::LayoutEditor;
use crate::tools::ToolState;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Subscription handle for removing a key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
    Shift,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS.
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            state: KeyState::Pressed,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            state: KeyState::Released,
            ..Self::press(key)
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

type KeyHandler = Rc<dyn Fn(&KeyEvent) -> bool>;

/// Single-threaded key event dispatcher.
#[derive(Default)]
pub struct KeyboardHub {
    handlers: RefCell<Vec<(SubscriptionId, KeyHandler)>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler. Handlers return true when they consumed the event.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&KeyEvent) -> bool + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        tracing::debug!("Key subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Key subscription {} removed", id);
        }
        removed
    }

    /// Offers the event to each handler in subscription order until one
    /// consumes it.
    pub fn dispatch(&self, event: &KeyEvent) -> bool {
        // Handlers may (un)subscribe while running.
        let handlers: Vec<KeyHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        handlers.iter().any(|handler| handler(event))
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl std::fmt::Debug for KeyboardHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Live shortcut binding. Unregisters on [`ShortcutRegistration::dispose`]
/// or drop.
#[derive(Debug)]
pub struct ShortcutRegistration {
    hub: Rc<KeyboardHub>,
    id: Option<SubscriptionId>,
}

impl ShortcutRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn dispose(&mut self) {
        if let Some(id) = self.id.take() {
            self.hub.unsubscribe(id);
        }
    }
}

impl Drop for ShortcutRegistration {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Binds the editor's shortcut table to `hub`.
pub fn register_keyboard_shortcuts(
    hub: &Rc<KeyboardHub>,
    editor: Rc<RefCell<LayoutEditor>>,
    store: Rc<RefCell<dyn DocumentStore>>,
) -> ShortcutRegistration {
    let id = hub.subscribe(move |event| {
        let (Ok(mut editor), Ok(mut store)) = (editor.try_borrow_mut(), store.try_borrow_mut())
        else {
            tracing::warn!("Editor busy, dropping key event {:?}", event.key);
            return false;
        };
        handle_shortcut(&mut editor, &mut *store, event)
    });
    ShortcutRegistration {
        hub: Rc::clone(hub),
        id: Some(id),
    }
}

fn tool_for_key(c: char) -> Option<ToolState> {
    match c {
        'v' => Some(ToolState::Select),
        'm' => Some(ToolState::Move),
        'r' => Some(ToolState::Rotate),
        's' => Some(ToolState::DrawShelf),
        'd' => Some(ToolState::DrawDock),
        'o' => Some(ToolState::DrawOffice),
        'z' => Some(ToolState::DrawZone),
        'e' => Some(ToolState::Erase),
        't' => Some(ToolState::Measure),
        'h' => Some(ToolState::Pan),
        _ => None,
    }
}

/// Puts a dragged element back before the tool changes under it.
fn abandon_drag(editor: &mut LayoutEditor, store: &mut dyn DocumentStore) {
    if editor.is_dragging() {
        if let Err(e) = editor.cancel_drag(store) {
            tracing::warn!("Could not cancel drag: {}", e);
        }
    }
}

/// Applies one key event to the editor. Returns true when it was a
/// shortcut.
pub fn handle_shortcut(
    editor: &mut LayoutEditor,
    store: &mut dyn DocumentStore,
    event: &KeyEvent,
) -> bool {
    if event.state == KeyState::Released {
        if event.key == Key::Shift {
            editor.set_ortho_modifier(false);
            return true;
        }
        return false;
    }

    let outcome = match (event.key, event.modifiers.ctrl) {
        (Key::Shift, _) => {
            editor.set_ortho_modifier(true);
            Ok(())
        }
        (Key::Char(c), true) => match (c.to_ascii_lowercase(), event.modifiers.shift) {
            ('z', false) => {
                editor.undo(store);
                Ok(())
            }
            ('z', true) | ('y', _) => {
                editor.redo(store);
                Ok(())
            }
            ('c', _) => editor.copy_selected(&*store).map(|_| ()),
            ('v', _) => editor.paste(store).map(|_| ()),
            ('d', _) => editor.duplicate_selected(store).map(|_| ()),
            _ => return false,
        },
        (Key::Char(c), false) => {
            let c = c.to_ascii_lowercase();
            if c == 'g' {
                editor.toggle_grid();
            } else if let Some(tool) = tool_for_key(c) {
                abandon_drag(editor, store);
                editor.set_tool(tool);
            } else {
                return false;
            }
            Ok(())
        }
        (Key::Delete | Key::Backspace, _) => editor.delete_selected(store).map(|_| ()),
        (Key::Escape, _) => {
            abandon_drag(editor, store);
            editor.escape();
            Ok(())
        }
        (Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown, _) => {
            if editor.selection().is_empty() {
                return false;
            }
            let (dx, dz) = match event.key {
                Key::ArrowLeft => (-1, 0),
                Key::ArrowRight => (1, 0),
                Key::ArrowUp => (0, -1),
                _ => (0, 1),
            };
            editor.nudge_selected(store, dx, dz).map(|_| ())
        }
    };

    if let Err(e) = outcome {
        tracing::warn!("Shortcut {:?} failed: {}", event.key, e);
    }
    true
}
