//! Selection, clipboard, duplicate and delete.

use super::LayoutEditor;
use crate::document::DocumentStore;
use crate::model::{Element, ElementId};
use rackplan_core::{Bounds, EditError, Result};

impl LayoutEditor {
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Selects an element, adding to the selection when `additive` is set.
    pub fn select(&mut self, id: ElementId, additive: bool) {
        if !additive {
            self.selection.clear();
        }
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn deselect(&mut self, id: &ElementId) {
        self.selection.retain(|s| s != id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects the topmost visible element under the point.
    pub fn select_at(
        &mut self,
        store: &dyn DocumentStore,
        x: f64,
        z: f64,
        additive: bool,
    ) -> Option<ElementId> {
        let point = Bounds::new(x, z, x, z);
        let hit = store
            .elements()
            .iter()
            .rev()
            .filter(|e| self.layers.is_element_visible(e.element_type()))
            .find(|e| e.bounds().contains(&point))
            .map(|e| e.id.clone());

        match &hit {
            Some(id) => self.select(id.clone(), additive),
            None if !additive => self.selection.clear(),
            None => {}
        }
        hit
    }

    fn selected_elements(&self, store: &dyn DocumentStore) -> Vec<Element> {
        store
            .elements()
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .cloned()
            .collect()
    }

    /// Copies the selected elements to the clipboard.
    pub fn copy_selected(&mut self, store: &dyn DocumentStore) -> Result<usize> {
        let elements = self.selected_elements(store);
        if elements.is_empty() {
            return Err(EditError::NothingSelected);
        }
        tracing::debug!("Copied {} elements", elements.len());
        self.clipboard = elements;
        Ok(self.clipboard.len())
    }

    pub fn clipboard(&self) -> &[Element] {
        &self.clipboard
    }

    /// Inserts copies of the clipboard one grid step down and right of the
    /// originals. Repeated pastes cascade.
    pub fn paste(&mut self, store: &mut dyn DocumentStore) -> Result<Vec<ElementId>> {
        if self.clipboard.is_empty() {
            return Err(EditError::ClipboardEmpty);
        }
        let sources = self.clipboard.clone();
        let ids = self.insert_copies(store, &sources, "Paste")?;

        let step = self.snap.grid_size();
        for element in &mut self.clipboard {
            element.position.x += step;
            element.position.z += step;
        }
        Ok(ids)
    }

    /// Copies the selection in place, leaving the clipboard alone.
    pub fn duplicate_selected(&mut self, store: &mut dyn DocumentStore) -> Result<Vec<ElementId>> {
        let sources = self.selected_elements(&*store);
        if sources.is_empty() {
            return Err(EditError::NothingSelected);
        }
        self.insert_copies(store, &sources, "Duplicate")
    }

    fn insert_copies(
        &mut self,
        store: &mut dyn DocumentStore,
        sources: &[Element],
        verb: &str,
    ) -> Result<Vec<ElementId>> {
        for source in sources {
            self.check_unlocked(source.element_type(), &source.id, "copy")?;
        }

        self.ensure_baseline(&*store);
        let step = self.snap.grid_size();
        let mut ids = Vec::with_capacity(sources.len());
        for source in sources {
            let mut copy = source.clone();
            copy.id = ElementId::generate(source.element_type());
            copy.position.x += step;
            copy.position.z += step;
            ids.push(copy.id.clone());
            store.add_element(copy);
        }

        self.selection = ids.clone();
        self.commit(&*store, format!("{} {} elements", verb, ids.len()));
        Ok(ids)
    }

    /// Deletes every selected element. Refuses as a whole when any of them
    /// sits on a locked layer.
    pub fn delete_selected(&mut self, store: &mut dyn DocumentStore) -> Result<usize> {
        let targets = self.selected_elements(&*store);
        if targets.is_empty() {
            return Err(EditError::NothingSelected);
        }
        for target in &targets {
            self.check_unlocked(target.element_type(), &target.id, "delete")?;
        }

        self.ensure_baseline(&*store);
        for target in &targets {
            store.remove_element(&target.id);
        }
        self.selection.clear();
        self.commit(&*store, format!("Delete {} elements", targets.len()));
        Ok(targets.len())
    }
}
