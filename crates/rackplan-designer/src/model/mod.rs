//! Layout element model.
//!
//! An [`Element`] is one placed item on the floor plan. Its type-specific
//! dimensions live in the [`ElementKind`] tagged union so that the validator
//! and the snap-anchor generator match on every type exhaustively.
//!
//! Documents exchange elements in the flat form
//! `{ id, type, position: {x, z}, rotation, dimensions: {...}, properties }`;
//! the conversion goes through [`ElementRecord`].

pub mod dimensions;

pub use dimensions::{
    DimensionRecord, DockDimensions, RoomDimensions, ShelfDimensions, ZoneDimensions,
};

use rackplan_core::{Bounds, LayoutError, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use std::str::FromStr;

/// Stable element identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id such as `shelf-1a2b3c4d`.
    pub fn generate(element_type: ElementType) -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", element_type.id(), &uuid[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Element type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Shelf,
    Dock,
    Office,
    Service,
    Zone,
}

impl ElementType {
    pub const ALL: [ElementType; 5] = [
        ElementType::Shelf,
        ElementType::Dock,
        ElementType::Office,
        ElementType::Service,
        ElementType::Zone,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Shelf => "shelf",
            Self::Dock => "dock",
            Self::Office => "office",
            Self::Service => "service",
            Self::Zone => "zone",
        }
    }

    /// Display name used in warning messages and guide labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shelf => "Shelf",
            Self::Dock => "Dock",
            Self::Office => "Office",
            Self::Service => "Service room",
            Self::Zone => "Zone",
        }
    }

    /// A kind of this type with every dimension left at its default.
    pub fn default_kind(&self) -> ElementKind {
        match self {
            Self::Shelf => ElementKind::Shelf(ShelfDimensions::default()),
            Self::Dock => ElementKind::Dock(DockDimensions::default()),
            Self::Office => ElementKind::Office(RoomDimensions::default()),
            Self::Service => ElementKind::Service(RoomDimensions::default()),
            Self::Zone => ElementKind::Zone(ZoneDimensions::default()),
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ElementType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id() == normalized)
            .ok_or_else(|| LayoutError::UnknownElementType(s.to_string()))
    }
}

/// Type-specific payload of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    Shelf(ShelfDimensions),
    Dock(DockDimensions),
    Office(RoomDimensions),
    Service(RoomDimensions),
    Zone(ZoneDimensions),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Shelf(_) => ElementType::Shelf,
            Self::Dock(_) => ElementType::Dock,
            Self::Office(_) => ElementType::Office,
            Self::Service(_) => ElementType::Service,
            Self::Zone(_) => ElementType::Zone,
        }
    }

    /// Unrotated footprint as (extent along X, extent along Z).
    pub fn footprint(&self) -> (f64, f64) {
        match self {
            Self::Shelf(d) => (d.length(), d.depth()),
            Self::Dock(d) => (d.width(), d.depth()),
            Self::Office(d) | Self::Service(d) => (d.length(), d.width()),
            Self::Zone(d) => (d.length(), d.width()),
        }
    }

    fn from_record(element_type: ElementType, record: &DimensionRecord) -> Self {
        match element_type {
            ElementType::Shelf => Self::Shelf(ShelfDimensions {
                length: record.length,
                depth: record.depth,
                height: record.height,
                levels: record.levels,
            }),
            ElementType::Dock => Self::Dock(DockDimensions {
                width: record.width,
                depth: record.depth,
                height: record.height,
            }),
            ElementType::Office => Self::Office(RoomDimensions {
                length: record.length,
                width: record.width,
                height: record.height,
            }),
            ElementType::Service => Self::Service(RoomDimensions {
                length: record.length,
                width: record.width,
                height: record.height,
            }),
            ElementType::Zone => Self::Zone(ZoneDimensions {
                length: record.length,
                width: record.width,
            }),
        }
    }

    fn to_record(self) -> DimensionRecord {
        match self {
            Self::Shelf(d) => DimensionRecord {
                length: d.length,
                depth: d.depth,
                height: d.height,
                levels: d.levels,
                ..DimensionRecord::default()
            },
            Self::Dock(d) => DimensionRecord {
                width: d.width,
                depth: d.depth,
                height: d.height,
                ..DimensionRecord::default()
            },
            Self::Office(d) | Self::Service(d) => DimensionRecord {
                length: d.length,
                width: d.width,
                height: d.height,
                ..DimensionRecord::default()
            },
            Self::Zone(d) => DimensionRecord {
                length: d.length,
                width: d.width,
                ..DimensionRecord::default()
            },
        }
    }
}

/// A placed layout element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Minimum (x, z) corner of the footprint.
    pub position: Position,
    /// Rotation about the vertical axis, radians.
    pub rotation: f64,
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl Element {
    /// Creates a new element.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            rotation: 0.0,
            properties: BTreeMap::new(),
        }
    }

    /// Shelf with explicit length (X) and depth (Z).
    pub fn shelf(id: &str, x: f64, z: f64, length: f64, depth: f64) -> Self {
        Self::new(
            id,
            ElementKind::Shelf(ShelfDimensions::new(length, depth)),
            Position::new(x, z),
        )
    }

    /// Dock with explicit door width.
    pub fn dock(id: &str, x: f64, z: f64, width: f64) -> Self {
        Self::new(
            id,
            ElementKind::Dock(DockDimensions::new(width)),
            Position::new(x, z),
        )
    }

    pub fn office(id: &str, x: f64, z: f64, length: f64, width: f64) -> Self {
        Self::new(
            id,
            ElementKind::Office(RoomDimensions::new(length, width)),
            Position::new(x, z),
        )
    }

    pub fn service(id: &str, x: f64, z: f64, length: f64, width: f64) -> Self {
        Self::new(
            id,
            ElementKind::Service(RoomDimensions::new(length, width)),
            Position::new(x, z),
        )
    }

    pub fn zone(id: &str, x: f64, z: f64, length: f64, width: f64) -> Self {
        Self::new(
            id,
            ElementKind::Zone(ZoneDimensions::new(length, width)),
            Position::new(x, z),
        )
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn is_shelf(&self) -> bool {
        matches!(self.kind, ElementKind::Shelf(_))
    }

    /// Rotation rounded to the nearest quarter turn, in `0..4`. Non-finite
    /// rotations count as unrotated.
    pub fn quarter_turns(&self) -> i64 {
        if !self.rotation.is_finite() {
            return 0;
        }
        ((self.rotation / FRAC_PI_2).round() as i64).rem_euclid(4)
    }

    /// True when the rotation is nearer to 90° or 270° than to 0° or 180°.
    pub fn is_quarter_turned(&self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Footprint extents after rotation, as (along X, along Z).
    pub fn extents(&self) -> (f64, f64) {
        let (sx, sz) = self.kind.footprint();
        if self.is_quarter_turned() {
            (sz, sx)
        } else {
            (sx, sz)
        }
    }

    /// Minimum corner with non-finite coordinates replaced by 0.
    pub fn origin(&self) -> Position {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Position::new(finite(self.position.x), finite(self.position.z))
    }

    /// Axis-aligned bounding box on the layout plane.
    pub fn bounds(&self) -> Bounds {
        let origin = self.origin();
        let (sx, sz) = self.extents();
        Bounds::from_origin_size(origin.x, origin.z, sx, sz)
    }

    pub fn center(&self) -> Position {
        self.bounds().center()
    }

    /// Name from the `name` property, falling back to the id.
    pub fn display_name(&self) -> String {
        self.properties
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Flat document representation of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub dimensions: DimensionRecord,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl From<ElementRecord> for Element {
    fn from(record: ElementRecord) -> Self {
        Self {
            kind: ElementKind::from_record(record.element_type, &record.dimensions),
            id: record.id,
            position: record.position,
            rotation: record.rotation,
            properties: record.properties,
        }
    }
}

impl From<Element> for ElementRecord {
    fn from(element: Element) -> Self {
        Self {
            id: element.id,
            element_type: element.kind.element_type(),
            position: element.position,
            rotation: element.rotation,
            dimensions: element.kind.to_record(),
            properties: element.properties,
        }
    }
}
