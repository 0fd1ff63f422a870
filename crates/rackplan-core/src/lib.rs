//! # RackPlan Core
//!
//! Core types shared by every RackPlan crate: plan-view geometry
//! (positions, bounding boxes, the warehouse envelope), the material-handling
//! machinery classes that drive aisle rules, the snapping configuration, and
//! the error types used across the workspace.

pub mod data;
pub mod error;

pub use data::{
    machinery::MachineryClass, snap::SnapConfig, Bounds, Envelope, Position, GEOMETRY_EPSILON,
};

pub use error::{EditError, LayoutError, Result};
