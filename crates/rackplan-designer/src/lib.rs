//! # RackPlan Designer
//!
//! This crate is the interactive layout-editing engine of RackPlan. It turns
//! pointer and keyboard input, already projected onto the floor plane, into
//! constrained and validated placement of warehouse elements.
//!
//! ## Core Components
//!
//! ### Layout Model
//! - **Elements**: Shelves, docks, offices, service rooms and zones
//! - **Layers**: Per-category visibility and lock flags
//! - **Document**: The store façade the host application implements
//!
//! ### Interaction
//! - **Tools**: Select, move, rotate, draw, erase, measure and pan
//! - **Snapping**: Ortho lock, guides, grid, walls and object anchors
//! - **Guides**: Alignment lines against other elements' edges and centres
//! - **Shortcuts**: Keyboard bindings dispatched through a hub
//!
//! ### Checking
//! - **Validator**: Aisle widths, dock clearance, collisions, bounds, density
//! - **History**: Bounded snapshot undo/redo
//!
//! ## Architecture
//!
//! ```text
//! KeyboardHub / pointer events
//!   └── LayoutEditor
//!         ├── ToolController
//!         ├── GuideCalculator ──► SnapResolver
//!         ├── LayerRegistry
//!         ├── HistoryManager
//!         └── ValidationRules ──► Warnings
//!
//! DocumentStore (host-owned elements and envelope)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rackplan_designer::{Element, InMemoryDocument, LayoutEditor, ToolState};
//!
//! let mut doc = InMemoryDocument::new(Envelope::default());
//! let mut editor = LayoutEditor::new();
//! editor.set_tool(ToolState::DrawShelf);
//! let id = editor.place_element(&mut doc, 4.3, 2.1)?;
//! println!("{}", editor.warning_summary());
//! ```

pub mod document;
pub mod editor;
pub mod guides;
pub mod history;
pub mod layers;
pub mod model;
pub mod shortcuts;
pub mod snapping;
pub mod tools;
pub mod validator;

pub use document::{DocumentStore, InMemoryDocument};
pub use editor::{DragSession, LayoutEditor};
pub use guides::{calculate_guides, Guide, GuideAnchor, GuideCalculator, GuideKind};
pub use history::{HistoryManager, HistoryPhase, HistorySnapshot};
pub use layers::{LayerCategory, LayerRegistry, LayerState};
pub use model::{Element, ElementId, ElementKind, ElementRecord, ElementType};
pub use shortcuts::{
    handle_shortcut, register_keyboard_shortcuts, Key, KeyEvent, KeyState, KeyboardHub,
    Modifiers, ShortcutRegistration, SubscriptionId,
};
pub use snapping::{SnapResolver, SnapResult, SnapTarget};
pub use tools::{DrawPreview, Measurement, ToolController, ToolState};
pub use validator::{
    check_collision, validate_layout, Severity, ValidationRules, Warning, WarningKind,
    WarningSummary,
};

pub use rackplan_core::{Bounds, EditError, Envelope, MachineryClass, Position, SnapConfig};
