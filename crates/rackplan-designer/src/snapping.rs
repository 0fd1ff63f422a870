//! Grid and snap resolution.
//!
//! Turns a raw pointer position into a snapped one. The heuristics run in a
//! fixed order: ortho lock, alignment guides, grid, walls, object anchors.
//! X and Z are resolved independently, so the two axes of one result may
//! come from different heuristics; [`SnapResult`] reports both sources.

use crate::guides::{Guide, GuideKind};
use crate::model::{Element, ElementId};
use rackplan_core::{Envelope, Position, SnapConfig};
use serde::Serialize;
use smallvec::SmallVec;

/// Default grid spacing in metres.
pub const DEFAULT_GRID_SIZE: f64 = 1.0;

/// Heuristic that produced a snapped coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapTarget {
    Ortho,
    Guide,
    Grid,
    Wall,
    Object,
}

impl std::fmt::Display for SnapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ortho => "ortho",
            Self::Guide => "guide",
            Self::Grid => "grid",
            Self::Wall => "wall",
            Self::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapResult {
    pub x: f64,
    pub z: f64,
    /// Last heuristic that fired on either axis.
    pub snapped_to: Option<SnapTarget>,
    pub x_source: Option<SnapTarget>,
    pub z_source: Option<SnapTarget>,
}

impl SnapResult {
    /// Raw input, nothing snapped.
    pub fn unsnapped(x: f64, z: f64) -> Self {
        Self {
            x,
            z,
            snapped_to: None,
            x_source: None,
            z_source: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.z)
    }

    fn set_x(&mut self, value: f64, source: SnapTarget) {
        self.x = value;
        self.x_source = Some(source);
        self.snapped_to = Some(source);
    }

    fn set_z(&mut self, value: f64, source: SnapTarget) {
        self.z = value;
        self.z_source = Some(source);
        self.snapped_to = Some(source);
    }
}

/// Nearest multiple of `grid_size`, if it lies within `distance`.
pub fn snap_to_grid(value: f64, grid_size: f64, distance: f64) -> Option<f64> {
    if !grid_size.is_finite() || grid_size <= 0.0 || !value.is_finite() {
        return None;
    }
    let snapped = (value / grid_size).round() * grid_size;
    ((snapped - value).abs() <= distance).then_some(snapped)
}

fn snap_to_walls(value: f64, far_wall: f64, distance: f64) -> Option<f64> {
    if value.abs() <= distance {
        Some(0.0)
    } else if far_wall.is_finite() && (value - far_wall).abs() <= distance {
        Some(far_wall)
    } else {
        None
    }
}

/// Anchor points of one element, gated by the endpoint and midpoint flags.
pub fn object_anchors(element: &Element, config: &SnapConfig) -> SmallVec<[Position; 9]> {
    let bounds = element.bounds();
    let mut anchors = SmallVec::new();
    if config.endpoint_snap {
        anchors.extend(bounds.corners());
    }
    anchors.push(bounds.center());
    if config.midpoint_snap {
        anchors.extend(bounds.edge_midpoints());
    }
    anchors
}

/// Snap state owned by the editor: configuration, grid, the ortho drag
/// origin and the guides of the current gesture.
#[derive(Debug, Clone)]
pub struct SnapResolver {
    pub config: SnapConfig,
    grid_size: f64,
    drag_origin: Option<Position>,
    ortho_modifier: bool,
    guides: Vec<Guide>,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new(SnapConfig::default(), DEFAULT_GRID_SIZE)
    }
}

impl SnapResolver {
    pub fn new(config: SnapConfig, grid_size: f64) -> Self {
        let mut resolver = Self {
            config,
            grid_size: DEFAULT_GRID_SIZE,
            drag_origin: None,
            ortho_modifier: false,
            guides: Vec::new(),
        };
        resolver.set_grid_size(grid_size);
        resolver
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Sets the grid spacing. Non-positive values are ignored.
    pub fn set_grid_size(&mut self, size: f64) -> bool {
        if !size.is_finite() || size <= 0.0 {
            tracing::warn!("Ignoring invalid grid size {}", size);
            return false;
        }
        self.grid_size = size;
        true
    }

    pub fn drag_origin(&self) -> Option<Position> {
        self.drag_origin
    }

    pub fn set_drag_origin(&mut self, origin: Option<Position>) {
        self.drag_origin = origin;
    }

    /// Held-key ortho lock, independent of the persistent toggle.
    pub fn set_ortho_modifier(&mut self, held: bool) {
        self.ortho_modifier = held;
    }

    pub fn ortho_active(&self) -> bool {
        self.config.ortho_mode || self.ortho_modifier
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn set_guides(&mut self, guides: Vec<Guide>) {
        self.guides = guides;
    }

    /// Drops the guides and drag origin of the finished gesture.
    pub fn clear_gesture(&mut self) {
        self.guides.clear();
        self.drag_origin = None;
    }

    /// Resolves a raw position against the layout.
    pub fn snap_position(
        &self,
        x: f64,
        z: f64,
        elements: &[Element],
        envelope: &Envelope,
        exclude_id: Option<&ElementId>,
    ) -> SnapResult {
        let distance = self.config.effective_distance();

        if let Some(origin) = self.drag_origin.filter(|_| self.ortho_active()) {
            return self.snap_ortho(x, z, origin, distance);
        }

        let mut result = SnapResult::unsnapped(x, z);
        if !self.config.enabled {
            return result;
        }

        if self.snap_to_guides(&mut result, distance) {
            tracing::debug!("Snapped ({:.3}, {:.3}) to guide", result.x, result.z);
            return result;
        }

        if self.config.grid_snap {
            if let Some(gx) = snap_to_grid(x, self.grid_size, distance) {
                result.set_x(gx, SnapTarget::Grid);
            }
            if let Some(gz) = snap_to_grid(z, self.grid_size, distance) {
                result.set_z(gz, SnapTarget::Grid);
            }
        }

        if self.config.wall_snap {
            if let Some(wx) = snap_to_walls(x, envelope.length, distance) {
                result.set_x(wx, SnapTarget::Wall);
            }
            if let Some(wz) = snap_to_walls(z, envelope.width, distance) {
                result.set_z(wz, SnapTarget::Wall);
            }
        }

        if self.config.object_snap {
            let anchor = elements
                .iter()
                .filter(|e| exclude_id != Some(&e.id))
                .flat_map(|e| object_anchors(e, &self.config))
                .find(|p| (p.x - x).abs() <= distance && (p.z - z).abs() <= distance);
            if let Some(anchor) = anchor {
                result.set_x(anchor.x, SnapTarget::Object);
                result.set_z(anchor.z, SnapTarget::Object);
            }
        }

        if let Some(target) = result.snapped_to {
            tracing::debug!(
                "Snapped ({:.3}, {:.3}) -> ({:.3}, {:.3}) via {}",
                x,
                z,
                result.x,
                result.z,
                target
            );
        }
        result
    }

    fn snap_ortho(&self, x: f64, z: f64, origin: Position, distance: f64) -> SnapResult {
        let grid = self.config.enabled && self.config.grid_snap;
        let free_x = (x - origin.x).abs() >= (z - origin.z).abs();
        let mut result = SnapResult {
            x,
            z,
            snapped_to: Some(SnapTarget::Ortho),
            x_source: None,
            z_source: None,
        };

        if free_x {
            result.z = origin.z;
            result.z_source = Some(SnapTarget::Ortho);
            if let Some(gx) = snap_to_grid(x, self.grid_size, distance).filter(|_| grid) {
                result.x = gx;
                result.x_source = Some(SnapTarget::Grid);
            }
        } else {
            result.x = origin.x;
            result.x_source = Some(SnapTarget::Ortho);
            if let Some(gz) = snap_to_grid(z, self.grid_size, distance).filter(|_| grid) {
                result.z = gz;
                result.z_source = Some(SnapTarget::Grid);
            }
        }
        result
    }

    fn snap_to_guides(&self, result: &mut SnapResult, distance: f64) -> bool {
        let nearest = |kind: GuideKind, value: f64| {
            self.guides
                .iter()
                .filter(|g| g.kind == kind)
                .map(|g| g.origin_coordinate())
                .filter(|c| (c - value).abs() <= distance)
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
        };

        let mut snapped = false;
        if let Some(gx) = nearest(GuideKind::Vertical, result.x) {
            result.set_x(gx, SnapTarget::Guide);
            snapped = true;
        }
        if let Some(gz) = nearest(GuideKind::Horizontal, result.z) {
            result.set_z(gz, SnapTarget::Guide);
            snapped = true;
        }
        snapped
    }
}
