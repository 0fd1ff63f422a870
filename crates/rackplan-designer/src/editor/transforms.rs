//! Element mutations: move, rotate, erase, place and nudge.
//!
//! Every mutation checks the element's layer lock first and leaves the
//! document untouched when it refuses. Pointer mutations (move, rotate,
//! erase) also need a tool that edits elements; keyboard edits (nudge,
//! delete, paste, duplicate) work under any tool.

use super::LayoutEditor;
use crate::document::DocumentStore;
use crate::layers::LayerCategory;
use crate::model::{Element, ElementId, ElementType};
use rackplan_core::{EditError, Position, Result};
use std::f64::consts::TAU;

impl LayoutEditor {
    /// Fails with [`EditError::LayerLocked`] when the type's layer is locked.
    pub(crate) fn check_unlocked(
        &self,
        element_type: ElementType,
        id: &ElementId,
        operation: &str,
    ) -> Result<()> {
        if self.layers.is_element_locked(element_type) {
            let layer = LayerCategory::for_type(element_type);
            tracing::warn!("Refusing to {} {}: layer '{}' is locked", operation, id, layer);
            return Err(EditError::LayerLocked {
                layer: layer.to_string(),
                operation: operation.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Fails with [`EditError::ToolMismatch`] unless the current tool edits
    /// elements.
    pub(crate) fn check_tool_mutates(&self, operation: &str) -> Result<()> {
        let tool = self.tools.current();
        if !tool.mutates_elements() {
            tracing::warn!("Refusing to {} with the {} tool", operation, tool);
            return Err(EditError::ToolMismatch {
                tool: tool.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Looks up an element and checks that `operation` may change it.
    pub(crate) fn editable_element(
        &self,
        store: &dyn DocumentStore,
        id: &ElementId,
        operation: &str,
    ) -> Result<Element> {
        let element = store
            .get_element_by_id(id)
            .cloned()
            .ok_or_else(|| EditError::ElementNotFound(id.to_string()))?;
        self.check_unlocked(element.element_type(), id, operation)?;
        Ok(element)
    }

    /// Moves an element's minimum corner to `position` and commits.
    pub fn move_element(
        &mut self,
        store: &mut dyn DocumentStore,
        id: &ElementId,
        position: Position,
    ) -> Result<()> {
        self.check_tool_mutates("move")?;
        let mut element = self.editable_element(&*store, id, "move")?;
        self.ensure_baseline(&*store);
        element.position = position;
        let name = element.display_name();
        store.update_element(element);
        self.commit(&*store, format!("Move {}", name));
        Ok(())
    }

    /// Adds `delta` radians to an element's rotation and commits.
    pub fn rotate_element(
        &mut self,
        store: &mut dyn DocumentStore,
        id: &ElementId,
        delta: f64,
    ) -> Result<()> {
        self.check_tool_mutates("rotate")?;
        let mut element = self.editable_element(&*store, id, "rotate")?;
        self.ensure_baseline(&*store);
        element.rotation = (element.rotation + delta).rem_euclid(TAU);
        let name = element.display_name();
        store.update_element(element);
        self.commit(&*store, format!("Rotate {}", name));
        Ok(())
    }

    /// Removes an element and commits.
    pub fn erase_element(
        &mut self,
        store: &mut dyn DocumentStore,
        id: &ElementId,
    ) -> Result<Element> {
        self.check_tool_mutates("erase")?;
        let element = self.editable_element(&*store, id, "erase")?;
        self.ensure_baseline(&*store);
        store.remove_element(id);
        self.selection.retain(|s| s != id);
        self.commit(&*store, format!("Delete {}", element.display_name()));
        Ok(element)
    }

    /// Places an element of the pending draw type at the snapped position.
    pub fn place_element(
        &mut self,
        store: &mut dyn DocumentStore,
        x: f64,
        z: f64,
    ) -> Result<ElementId> {
        let element_type = self.tools.pending_type().ok_or_else(|| EditError::ToolMismatch {
            tool: self.tools.current().to_string(),
            operation: "place".to_string(),
        })?;
        let id = ElementId::generate(element_type);
        self.check_unlocked(element_type, &id, "place")?;

        let snapped = self.snap_position(x, z, &*store, None);
        self.ensure_baseline(&*store);
        let element = Element::new(id.clone(), element_type.default_kind(), snapped.position());
        store.add_element(element);

        self.tools.take_preview();
        self.snap.clear_gesture();
        self.commit(&*store, format!("Add {}", element_type.label()));
        tracing::info!("Placed {} at ({:.2}, {:.2})", id, snapped.x, snapped.z);
        Ok(id)
    }

    /// Moves the selection by whole grid steps. Elements on locked layers
    /// stay put. Returns how many elements moved.
    pub fn nudge_selected(
        &mut self,
        store: &mut dyn DocumentStore,
        steps_x: i32,
        steps_z: i32,
    ) -> Result<usize> {
        if self.selection.is_empty() {
            return Err(EditError::NothingSelected);
        }
        let step = self.snap.grid_size();
        let (dx, dz) = (f64::from(steps_x) * step, f64::from(steps_z) * step);

        let mut elements = store.elements().to_vec();
        let mut moved = 0;
        for element in elements
            .iter_mut()
            .filter(|e| self.selection.contains(&e.id))
        {
            if self.layers.is_element_locked(element.element_type()) {
                tracing::warn!("Skipping nudge of locked element {}", element.id);
                continue;
            }
            element.position.x += dx;
            element.position.z += dz;
            moved += 1;
        }

        if moved > 0 {
            self.ensure_baseline(&*store);
            store.set_elements(elements);
            self.commit(&*store, format!("Nudge {} elements", moved));
        }
        Ok(moved)
    }
}
