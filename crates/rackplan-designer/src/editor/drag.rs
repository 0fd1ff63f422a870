//! Pointer drag sessions.
//!
//! A drag moves one element live: each frame recomputes the alignment
//! guides, snaps the element's corner and writes the new position to the
//! document. Only the end of the drag is recorded in history.

use super::LayoutEditor;
use crate::document::DocumentStore;
use crate::model::ElementId;
use crate::snapping::SnapResult;
use crate::tools::ToolState;
use rackplan_core::{EditError, Position, Result};

/// State of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub element_id: ElementId,
    /// Element corner when the drag started.
    pub start: Position,
    /// Pointer position relative to the element corner.
    pub grab_offset: Position,
    pub extents: (f64, f64),
    pub moved: bool,
}

impl LayoutEditor {
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts dragging `id` from the pointer position `pointer`.
    pub fn begin_drag(
        &mut self,
        store: &dyn DocumentStore,
        id: &ElementId,
        pointer: Position,
    ) -> Result<()> {
        let tool = self.tools.current();
        if tool != ToolState::Move {
            return Err(EditError::ToolMismatch {
                tool: tool.to_string(),
                operation: "drag".to_string(),
            });
        }
        let element = self.editable_element(store, id, "move")?;
        self.ensure_baseline(store);

        let start = element.origin();
        self.snap.set_drag_origin(Some(start));
        self.drag = Some(DragSession {
            element_id: id.clone(),
            start,
            grab_offset: Position::new(pointer.x - start.x, pointer.z - start.z),
            extents: element.extents(),
            moved: false,
        });
        self.select(id.clone(), false);
        tracing::debug!("Drag started on {}", id);
        Ok(())
    }

    /// Moves the dragged element to follow the pointer.
    pub fn drag_to(
        &mut self,
        store: &mut dyn DocumentStore,
        x: f64,
        z: f64,
    ) -> Result<SnapResult> {
        let session = self.drag.clone().ok_or(EditError::NoActiveDrag)?;
        let proposed = Position::new(x - session.grab_offset.x, z - session.grab_offset.z);
        let exclude = Some(&session.element_id);
        let result =
            self.resolve_pointer(proposed.x, proposed.z, session.extents, &*store, exclude);

        let mut element = store
            .get_element_by_id(&session.element_id)
            .cloned()
            .ok_or_else(|| EditError::ElementNotFound(session.element_id.to_string()))?;
        element.position = result.position();
        store.update_element(element);
        self.validate(&*store);

        if let Some(drag) = &mut self.drag {
            drag.moved = true;
        }
        Ok(result)
    }

    /// Finishes the drag. Returns whether a history entry was recorded.
    pub fn end_drag(&mut self, store: &dyn DocumentStore) -> Result<bool> {
        let session = self.drag.take().ok_or(EditError::NoActiveDrag)?;
        self.snap.clear_gesture();

        let moved_to = store
            .get_element_by_id(&session.element_id)
            .map(|e| e.origin());
        let changed = session.moved && moved_to.is_some_and(|p| p != session.start);
        if changed {
            self.commit(store, format!("Move {}", session.element_id));
        } else {
            self.validate(store);
        }
        tracing::debug!("Drag ended on {} (changed={})", session.element_id, changed);
        Ok(changed)
    }

    /// Aborts the drag and puts the element back where it started.
    pub fn cancel_drag(&mut self, store: &mut dyn DocumentStore) -> Result<()> {
        let session = self.drag.take().ok_or(EditError::NoActiveDrag)?;
        self.snap.clear_gesture();
        if let Some(mut element) = store.get_element_by_id(&session.element_id).cloned() {
            element.position = session.start;
            store.update_element(element);
        }
        self.validate(&*store);
        Ok(())
    }
}
