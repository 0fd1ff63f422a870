//! Document store façade.
//!
//! The element set and the envelope belong to the host application. The
//! editor reads them and proposes mutations through [`DocumentStore`].

use crate::model::{Element, ElementId};
use rackplan_core::Envelope;
use serde::{Deserialize, Serialize};

/// Access to the layout document owned by the host.
pub trait DocumentStore {
    fn elements(&self) -> &[Element];

    fn envelope(&self) -> Envelope;

    /// Replaces the whole element set.
    fn set_elements(&mut self, elements: Vec<Element>);

    fn add_element(&mut self, element: Element);

    /// Removes an element, returning it if it existed.
    fn remove_element(&mut self, id: &ElementId) -> Option<Element>;

    fn get_element_by_id(&self, id: &ElementId) -> Option<&Element> {
        self.elements().iter().find(|e| &e.id == id)
    }

    /// Replaces the element with the same id. Returns false if none exists.
    fn update_element(&mut self, element: Element) -> bool {
        let mut elements = self.elements().to_vec();
        match elements.iter_mut().find(|e| e.id == element.id) {
            Some(slot) => {
                *slot = element;
                self.set_elements(elements);
                true
            }
            None => false,
        }
    }
}

/// Plain in-memory document, also the on-disk layout format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDocument {
    #[serde(default)]
    pub envelope: Envelope,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl InMemoryDocument {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            envelope,
            elements: Vec::new(),
        }
    }

    pub fn with_elements(envelope: Envelope, elements: Vec<Element>) -> Self {
        Self { envelope, elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl DocumentStore for InMemoryDocument {
    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn envelope(&self) -> Envelope {
        self.envelope
    }

    fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        Some(self.elements.remove(index))
    }

    fn update_element(&mut self, element: Element) -> bool {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }
}
