//! Error handling for RackPlan
//!
//! Layout rule violations (collisions, narrow aisles, ...) are never errors:
//! they are reported as warnings by the validator. The types here cover the
//! cases where a request itself cannot be honoured:
//! - Layout errors (malformed input data)
//! - Edit errors (mutations refused by the editor)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors about layout data itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The warehouse envelope is degenerate
    #[error("Invalid envelope {length} x {width}")]
    InvalidEnvelope {
        /// Envelope length (X).
        length: f64,
        /// Envelope width (Z).
        width: f64,
    },

    /// Unknown machinery identifier
    #[error("Unknown machinery class: {0}")]
    UnknownMachinery(String),

    /// Unknown element type identifier
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),
}

/// Errors returned when the editor refuses a mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// The element's layer is locked
    #[error("Layer '{layer}' is locked; cannot {operation} element {id}")]
    LayerLocked {
        /// Layer (category) name.
        layer: String,
        /// Attempted operation.
        operation: String,
        /// Target element id.
        id: String,
    },

    /// The referenced element does not exist
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The active tool does not allow the operation
    #[error("Tool '{tool}' does not allow {operation}")]
    ToolMismatch {
        /// Active tool name.
        tool: String,
        /// Attempted operation.
        operation: String,
    },

    /// An operation needing a selection was called without one
    #[error("Nothing selected")]
    NothingSelected,

    /// Paste was requested with an empty clipboard
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// A drag operation was requested without an active drag
    #[error("No drag in progress")]
    NoActiveDrag,

    /// Underlying layout data problem
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result type for RackPlan edit operations.
pub type Result<T> = std::result::Result<T, EditError>;
