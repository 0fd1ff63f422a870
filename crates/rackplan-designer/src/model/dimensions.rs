//! Type-specific element dimensions.
//!
//! Every field is optional so that half-built elements (a shelf being drawn
//! whose depth has not been typed in yet) stay usable. Accessors substitute
//! the documented default whenever a value is missing, non-finite or not
//! strictly positive.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHELF_LENGTH: f64 = 2.7;
pub const DEFAULT_SHELF_DEPTH: f64 = 1.1;
pub const DEFAULT_SHELF_HEIGHT: f64 = 6.0;
pub const DEFAULT_SHELF_LEVELS: u32 = 4;

pub const DEFAULT_DOCK_WIDTH: f64 = 3.5;
pub const DEFAULT_DOCK_DEPTH: f64 = 0.5;
pub const DEFAULT_DOCK_HEIGHT: f64 = 4.5;

pub const DEFAULT_ROOM_LENGTH: f64 = 6.0;
pub const DEFAULT_ROOM_WIDTH: f64 = 4.0;
pub const DEFAULT_ROOM_HEIGHT: f64 = 3.0;

pub const DEFAULT_ZONE_LENGTH: f64 = 5.0;
pub const DEFAULT_ZONE_WIDTH: f64 = 5.0;

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

/// Pallet racking run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShelfDimensions {
    /// Run length along X.
    pub length: Option<f64>,
    /// Depth along Z.
    pub depth: Option<f64>,
    pub height: Option<f64>,
    pub levels: Option<u32>,
}

impl ShelfDimensions {
    pub fn new(length: f64, depth: f64) -> Self {
        Self {
            length: Some(length),
            depth: Some(depth),
            ..Self::default()
        }
    }

    pub fn length(&self) -> f64 {
        positive_or(self.length, DEFAULT_SHELF_LENGTH)
    }

    pub fn depth(&self) -> f64 {
        positive_or(self.depth, DEFAULT_SHELF_DEPTH)
    }

    pub fn height(&self) -> f64 {
        positive_or(self.height, DEFAULT_SHELF_HEIGHT)
    }

    pub fn levels(&self) -> u32 {
        self.levels.filter(|l| *l > 0).unwrap_or(DEFAULT_SHELF_LEVELS)
    }
}

/// Loading dock door with its apron.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DockDimensions {
    /// Door width along X.
    pub width: Option<f64>,
    /// Depth into the building along Z.
    pub depth: Option<f64>,
    pub height: Option<f64>,
}

impl DockDimensions {
    pub fn new(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn width(&self) -> f64 {
        positive_or(self.width, DEFAULT_DOCK_WIDTH)
    }

    pub fn depth(&self) -> f64 {
        positive_or(self.depth, DEFAULT_DOCK_DEPTH)
    }

    pub fn height(&self) -> f64 {
        positive_or(self.height, DEFAULT_DOCK_HEIGHT)
    }
}

/// Enclosed room (offices, service rooms).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl RoomDimensions {
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: None,
        }
    }

    pub fn length(&self) -> f64 {
        positive_or(self.length, DEFAULT_ROOM_LENGTH)
    }

    pub fn width(&self) -> f64 {
        positive_or(self.width, DEFAULT_ROOM_WIDTH)
    }

    pub fn height(&self) -> f64 {
        positive_or(self.height, DEFAULT_ROOM_HEIGHT)
    }
}

/// Floor-marked area (picking, staging, quarantine...).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

impl ZoneDimensions {
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
        }
    }

    pub fn length(&self) -> f64 {
        positive_or(self.length, DEFAULT_ZONE_LENGTH)
    }

    pub fn width(&self) -> f64 {
        positive_or(self.width, DEFAULT_ZONE_WIDTH)
    }
}

/// Loose dimension record as found in layout documents. Only the fields
/// relevant to the element's type are read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<u32>,
}
