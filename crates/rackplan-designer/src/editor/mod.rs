//! Layout editor: the single owner of interactive editing state.
//!
//! The editor owns the tool machine, snap resolver, guides, history, layer
//! flags and the current warning set. The element set itself stays in the
//! host's [`DocumentStore`], which every mutating call receives explicitly.
//!
//! This module is split into submodules:
//! - `transforms`: move, rotate, erase, place and nudge
//! - `selection`: selection, clipboard, duplicate and delete
//! - `drag`: pointer drag sessions with guides and snapping

mod drag;
mod selection;
mod transforms;

pub use drag::DragSession;

use crate::document::DocumentStore;
use crate::guides::{Guide, GuideCalculator};
use crate::history::{HistoryManager, HistorySnapshot, DEFAULT_MAX_HISTORY_LENGTH};
use crate::layers::LayerRegistry;
use crate::model::{Element, ElementId, ElementType};
use crate::snapping::{SnapResolver, SnapResult, DEFAULT_GRID_SIZE};
use crate::tools::{Measurement, ToolController, ToolState};
use crate::validator::{ValidationRules, Warning, WarningSummary};
use rackplan_core::{MachineryClass, Position, SnapConfig};

/// Interactive layout editor.
#[derive(Debug, Clone)]
pub struct LayoutEditor {
    tools: ToolController,
    snap: SnapResolver,
    guide_calculator: GuideCalculator,
    history: HistoryManager,
    layers: LayerRegistry,
    rules: ValidationRules,
    warnings: Vec<Warning>,
    grid_visible: bool,
    selection: Vec<ElementId>,
    clipboard: Vec<Element>,
    drag: Option<DragSession>,
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEditor {
    /// Creates an editor with default settings.
    pub fn new() -> Self {
        Self {
            tools: ToolController::new(),
            snap: SnapResolver::new(SnapConfig::default(), DEFAULT_GRID_SIZE),
            guide_calculator: GuideCalculator::default(),
            history: HistoryManager::with_max_length(DEFAULT_MAX_HISTORY_LENGTH),
            layers: LayerRegistry::new(),
            rules: ValidationRules::default(),
            warnings: Vec::new(),
            grid_visible: true,
            selection: Vec::new(),
            clipboard: Vec::new(),
            drag: None,
        }
    }

    pub fn with_snap_config(mut self, config: SnapConfig) -> Self {
        self.snap.config = config;
        self
    }

    pub fn with_grid_size(mut self, size: f64) -> Self {
        self.snap.set_grid_size(size);
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_guide_calculator(mut self, calculator: GuideCalculator) -> Self {
        self.guide_calculator = calculator;
        self
    }

    pub fn with_max_history(mut self, max_length: usize) -> Self {
        self.history.set_max_length(max_length);
        self
    }

    pub fn with_grid_visible(mut self, visible: bool) -> Self {
        self.grid_visible = visible;
        self
    }

    // Tools

    pub fn tool(&self) -> ToolState {
        self.tools.current()
    }

    /// Switches tool and drops every piece of gesture state.
    ///
    /// Refuses (returns `false`) while a drag has already moved its element:
    /// the document holds an uncommitted position that only
    /// [`end_drag`](Self::end_drag) or [`cancel_drag`](Self::cancel_drag)
    /// can settle.
    pub fn set_tool(&mut self, tool: ToolState) -> bool {
        if let Some(drag) = self.drag.as_ref().filter(|d| d.moved) {
            tracing::warn!(
                "Ignoring switch to {} while {} is being dragged",
                tool,
                drag.element_id
            );
            return false;
        }
        self.tools.set_tool(tool);
        self.snap.clear_gesture();
        self.drag = None;
        true
    }

    /// Back to the select tool with nothing selected.
    pub fn escape(&mut self) -> bool {
        if !self.set_tool(ToolState::Select) {
            return false;
        }
        self.selection.clear();
        true
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn begin_measure(&mut self, start: Position) -> bool {
        self.tools.begin_measure(start)
    }

    pub fn update_measure(&mut self, end: Position) -> Option<Measurement> {
        self.tools.update_measure(end)
    }

    // Grid and snapping

    pub fn snap_config(&self) -> &SnapConfig {
        &self.snap.config
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn grid_size(&self) -> f64 {
        self.snap.grid_size()
    }

    /// Flips grid display and grid snapping together.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.snap.config.grid_snap = self.grid_visible;
        tracing::info!("Grid {}", if self.grid_visible { "on" } else { "off" });
        self.grid_visible
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.snap.config.enabled = !self.snap.config.enabled;
        tracing::info!("Snapping enabled={}", self.snap.config.enabled);
        self.snap.config.enabled
    }

    pub fn toggle_ortho(&mut self) -> bool {
        self.snap.config.ortho_mode = !self.snap.config.ortho_mode;
        tracing::info!("Ortho mode={}", self.snap.config.ortho_mode);
        self.snap.config.ortho_mode
    }

    /// Held-modifier ortho lock (Shift).
    pub fn set_ortho_modifier(&mut self, held: bool) {
        self.snap.set_ortho_modifier(held);
    }

    pub fn set_grid_size(&mut self, size: f64) -> bool {
        self.snap.set_grid_size(size)
    }

    pub fn set_snap_distance(&mut self, distance: f64) {
        self.snap.config.set_snap_distance(distance);
    }

    /// Resolves a raw pointer position against the document.
    pub fn snap_position(
        &self,
        x: f64,
        z: f64,
        store: &dyn DocumentStore,
        exclude_id: Option<&ElementId>,
    ) -> SnapResult {
        self.snap
            .snap_position(x, z, store.elements(), &store.envelope(), exclude_id)
    }

    /// Recomputes the alignment guides for a moving box and makes them the
    /// active guides used by snapping.
    pub fn calculate_guides(
        &mut self,
        x: f64,
        z: f64,
        width: f64,
        depth: f64,
        store: &dyn DocumentStore,
        exclude_id: Option<&ElementId>,
    ) -> &[Guide] {
        let elements = store.elements();
        let guides = self.guide_calculator.calculate(x, z, width, depth, elements, exclude_id);
        self.snap.set_guides(guides);
        self.snap.guides()
    }

    pub fn guides(&self) -> &[Guide] {
        self.snap.guides()
    }

    pub fn clear_guides(&mut self) {
        self.snap.set_guides(Vec::new());
    }

    /// Runs guides and snapping for a box under the pointer, as far as the
    /// current tool allows.
    pub(crate) fn resolve_pointer(
        &mut self,
        x: f64,
        z: f64,
        (width, depth): (f64, f64),
        store: &dyn DocumentStore,
        exclude_id: Option<&ElementId>,
    ) -> SnapResult {
        let tool = self.tools.current();
        if tool.runs_guides() {
            self.calculate_guides(x, z, width, depth, store, exclude_id);
        } else {
            self.clear_guides();
        }
        if tool.runs_snapping() {
            self.snap_position(x, z, store, exclude_id)
        } else {
            SnapResult::unsnapped(x, z)
        }
    }

    /// Updates the draw preview for the pointer, snapping its corner.
    pub fn update_preview(&mut self, x: f64, z: f64, store: &dyn DocumentStore) -> SnapResult {
        let Some(element_type) = self.tools.pending_type() else {
            return SnapResult::unsnapped(x, z);
        };
        let (width, depth) = element_type.default_kind().footprint();
        let result = self.resolve_pointer(x, z, (width, depth), store, None);
        if self.tools.preview().is_none() {
            self.tools.begin_preview(result.position());
        } else {
            self.tools.update_preview(result.position());
        }
        result
    }

    // Layers

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerRegistry {
        &mut self.layers
    }

    pub fn is_element_visible(&self, element_type: ElementType) -> bool {
        self.layers.is_element_visible(element_type)
    }

    pub fn is_element_locked(&self, element_type: ElementType) -> bool {
        self.layers.is_element_locked(element_type)
    }

    // Validation

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn machinery(&self) -> MachineryClass {
        self.rules.machinery
    }

    /// Changes the machinery class and revalidates.
    pub fn set_machinery(&mut self, machinery: MachineryClass, store: &dyn DocumentStore) {
        tracing::info!("Machinery class set to {}", machinery);
        self.rules.machinery = machinery;
        self.validate(store);
    }

    /// Replaces the warning set with a full validation of the document.
    pub fn validate(&mut self, store: &dyn DocumentStore) -> &[Warning] {
        self.warnings = self.rules.validate(store.elements(), &store.envelope());
        &self.warnings
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn warning_summary(&self) -> WarningSummary {
        WarningSummary::from_warnings(&self.warnings)
    }

    // History

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn push_to_history(&mut self, snapshot: HistorySnapshot) {
        self.history.push(snapshot);
    }

    /// Starts a fresh history whose first entry is the current document.
    pub fn reset_history(&mut self, store: &dyn DocumentStore) {
        self.history.clear();
        self.history
            .push(HistorySnapshot::new(store.elements().to_vec(), "Open layout"));
        self.validate(store);
    }

    /// Records the pre-edit document when nothing has been recorded yet, so
    /// the first edit can be undone.
    pub(crate) fn ensure_baseline(&mut self, store: &dyn DocumentStore) {
        if self.history.is_empty() {
            self.history
                .push(HistorySnapshot::new(store.elements().to_vec(), "Initial layout"));
        }
    }

    /// Snapshots the document after a mutation and revalidates.
    pub fn commit(&mut self, store: &dyn DocumentStore, description: impl Into<String>) {
        let description = description.into();
        tracing::debug!("Commit: {}", description);
        self.history
            .push(HistorySnapshot::new(store.elements().to_vec(), description));
        self.validate(store);
    }

    pub fn undo(&mut self, store: &mut dyn DocumentStore) -> Option<HistorySnapshot> {
        let snapshot = self.history.undo()?;
        self.apply_snapshot(store, &snapshot);
        Some(snapshot)
    }

    pub fn redo(&mut self, store: &mut dyn DocumentStore) -> Option<HistorySnapshot> {
        let snapshot = self.history.redo()?;
        self.apply_snapshot(store, &snapshot);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn apply_snapshot(&mut self, store: &mut dyn DocumentStore, snapshot: &HistorySnapshot) {
        self.history.begin_apply();
        store.set_elements(snapshot.elements.clone());
        // Store observers commit on change; the phase keeps that out of history.
        self.commit(&*store, "Apply history");
        self.history.end_apply();

        self.drag = None;
        self.snap.clear_gesture();
        self.selection
            .retain(|id| snapshot.elements.iter().any(|e| &e.id == id));
    }
}
