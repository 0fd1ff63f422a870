//! Plan-view geometry.
//!
//! The layout plane uses X for the envelope length and Z for the envelope
//! width (Y is height and never appears here). All values are metres.

pub mod machinery;
pub mod snap;

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// Tolerance used for every "touching is not overlapping" comparison.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// A point on the layout plane. Missing coordinates deserialize as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    /// Midpoint between two positions.
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.z + other.z) / 2.0)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, z): (f64, f64)) -> Self {
        Self::new(x, z)
    }
}

/// Warehouse envelope. Only `length` (X) and `width` (Z) take part in
/// layout rules; `height` is carried for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub length: f64,
    pub width: f64,
    #[serde(default = "default_envelope_height")]
    pub height: f64,
}

fn default_envelope_height() -> f64 {
    10.0
}

impl Envelope {
    /// Creates a new envelope.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Floor area usable for the layout.
    pub fn floor_area(&self) -> f64 {
        if self.length.is_finite() && self.width.is_finite() {
            (self.length * self.width).max(0.0)
        } else {
            0.0
        }
    }

    /// The envelope as a bounding box anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.length, self.width)
    }

    pub fn center(&self) -> Position {
        Position::new(self.length / 2.0, self.width / 2.0)
    }

    /// Rejects envelopes whose floor is not a finite, positive rectangle.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.length) && usable(self.width) {
            Ok(())
        } else {
            Err(LayoutError::InvalidEnvelope {
                length: self.length,
                width: self.width,
            })
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(40.0, 25.0, default_envelope_height())
    }
}

/// Axis-aligned bounding box on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Creates bounds from two corners, normalising their order.
    pub fn new(x1: f64, z1: f64, x2: f64, z2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_z: z1.min(z2),
            max_x: x1.max(x2),
            max_z: z1.max(z2),
        }
    }

    /// Creates bounds from a minimum corner and a size.
    pub fn from_origin_size(x: f64, z: f64, size_x: f64, size_z: f64) -> Self {
        Self::new(x, z, x + size_x, z + size_z)
    }

    /// Extent along X.
    pub fn size_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Z.
    pub fn size_z(&self) -> f64 {
        self.max_z - self.min_z
    }

    pub fn area(&self) -> f64 {
        self.size_x() * self.size_z()
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Strict overlap test. Boxes that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x - GEOMETRY_EPSILON
            && other.min_x < self.max_x - GEOMETRY_EPSILON
            && self.min_z < other.max_z - GEOMETRY_EPSILON
            && other.min_z < self.max_z - GEOMETRY_EPSILON
    }

    /// The overlapping region of two boxes, if they strictly intersect.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }
        Some(Bounds::new(
            self.min_x.max(other.min_x),
            self.min_z.max(other.min_z),
            self.max_x.min(other.max_x),
            self.max_z.min(other.max_z),
        ))
    }

    /// True when `other` lies completely inside this box (edges may touch).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x - GEOMETRY_EPSILON
            && other.min_z >= self.min_z - GEOMETRY_EPSILON
            && other.max_x <= self.max_x + GEOMETRY_EPSILON
            && other.max_z <= self.max_z + GEOMETRY_EPSILON
    }

    /// Corners in the order min/min, max/min, max/max, min/max.
    pub fn corners(&self) -> [Position; 4] {
        [
            Position::new(self.min_x, self.min_z),
            Position::new(self.max_x, self.min_z),
            Position::new(self.max_x, self.max_z),
            Position::new(self.min_x, self.max_z),
        ]
    }

    /// Midpoints of the four edges, in the same winding as [`Bounds::corners`].
    pub fn edge_midpoints(&self) -> [Position; 4] {
        let c = self.center();
        [
            Position::new(c.x, self.min_z),
            Position::new(self.max_x, c.z),
            Position::new(c.x, self.max_z),
            Position::new(self.min_x, c.z),
        ]
    }
}
