//! Alignment guides.
//!
//! While an element is dragged or drawn, its edges and centre are compared
//! with those of every other element. Features that nearly line up produce
//! a guide line at the other element's coordinate. Guides are transient:
//! the editor recomputes them every frame and drops them when the gesture
//! ends.

use crate::model::{Element, ElementId};
use rackplan_core::Bounds;
use serde::Serialize;

/// Distance (metres) at which two features count as aligned.
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 1.0;

/// Guides of the same kind and anchor closer than this are merged.
pub const GUIDE_DEDUPE_TOLERANCE: f64 = 0.05;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideKind {
    /// Line of constant Z.
    Horizontal,
    /// Line of constant X.
    Vertical,
}

/// Feature of the moving box that lines up with the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAnchor {
    /// Minimum edge (left for X, top for Z).
    Start,
    Center,
    /// Maximum edge (right for X, bottom for Z).
    End,
}

impl GuideAnchor {
    fn edge_name(&self, kind: GuideKind) -> &'static str {
        match (kind, self) {
            (GuideKind::Vertical, GuideAnchor::Start) => "left edge",
            (GuideKind::Vertical, GuideAnchor::End) => "right edge",
            (GuideKind::Horizontal, GuideAnchor::Start) => "top edge",
            (GuideKind::Horizontal, GuideAnchor::End) => "bottom edge",
            (_, GuideAnchor::Center) => "center",
        }
    }
}

/// A transient alignment line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub kind: GuideKind,
    /// X for vertical guides, Z for horizontal ones.
    pub position: f64,
    pub label: String,
    pub anchor: GuideAnchor,
    /// Distance from the moving box's minimum corner to the anchored feature.
    pub anchor_offset: f64,
}

impl Guide {
    /// Minimum-corner coordinate that puts the anchored feature on the line.
    pub fn origin_coordinate(&self) -> f64 {
        self.position - self.anchor_offset
    }
}

/// Guide calculator with its tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideCalculator {
    pub threshold: f64,
    pub dedupe_tolerance: f64,
}

impl Default for GuideCalculator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALIGNMENT_THRESHOLD,
            dedupe_tolerance: GUIDE_DEDUPE_TOLERANCE,
        }
    }
}

impl GuideCalculator {
    pub fn new(threshold: f64, dedupe_tolerance: f64) -> Self {
        Self {
            threshold,
            dedupe_tolerance,
        }
    }

    /// Guides for a moving box at `(x, z)` sized `width` along X and `depth`
    /// along Z.
    pub fn calculate(
        &self,
        x: f64,
        z: f64,
        width: f64,
        depth: f64,
        elements: &[Element],
        exclude_id: Option<&ElementId>,
    ) -> Vec<Guide> {
        let moving = Bounds::from_origin_size(x, z, width.max(0.0), depth.max(0.0));
        let mut guides: Vec<Guide> = Vec::new();

        for element in elements {
            if exclude_id == Some(&element.id) {
                continue;
            }
            let other = element.bounds();
            let name = element.display_name();

            for (anchor, mine, theirs, offset) in x_features(&moving, &other) {
                if (mine - theirs).abs() <= self.threshold {
                    self.push_unique(
                        &mut guides,
                        Guide {
                            kind: GuideKind::Vertical,
                            position: theirs,
                            label: format!("{} {}", name, anchor.edge_name(GuideKind::Vertical)),
                            anchor,
                            anchor_offset: offset,
                        },
                    );
                }
            }

            for (anchor, mine, theirs, offset) in z_features(&moving, &other) {
                if (mine - theirs).abs() <= self.threshold {
                    self.push_unique(
                        &mut guides,
                        Guide {
                            kind: GuideKind::Horizontal,
                            position: theirs,
                            label: format!(
                                "{} {}",
                                name,
                                anchor.edge_name(GuideKind::Horizontal)
                            ),
                            anchor,
                            anchor_offset: offset,
                        },
                    );
                }
            }
        }

        tracing::debug!("Calculated {} alignment guides", guides.len());
        guides
    }

    /// Keeps the first guide per kind, anchor and position. Guides on the
    /// same line with different anchors stay separate because each one
    /// snaps the box to a different corner coordinate.
    fn push_unique(&self, guides: &mut Vec<Guide>, guide: Guide) {
        let duplicate = guides.iter().any(|g| {
            g.kind == guide.kind
                && g.anchor == guide.anchor
                && (g.position - guide.position).abs() < self.dedupe_tolerance
        });
        if !duplicate {
            guides.push(guide);
        }
    }
}

type Feature = (GuideAnchor, f64, f64, f64);

fn x_features(moving: &Bounds, other: &Bounds) -> [Feature; 3] {
    let width = moving.size_x();
    [
        (GuideAnchor::Start, moving.min_x, other.min_x, 0.0),
        (GuideAnchor::End, moving.max_x, other.max_x, width),
        (
            GuideAnchor::Center,
            moving.center().x,
            other.center().x,
            width / 2.0,
        ),
    ]
}

fn z_features(moving: &Bounds, other: &Bounds) -> [Feature; 3] {
    let depth = moving.size_z();
    [
        (GuideAnchor::Start, moving.min_z, other.min_z, 0.0),
        (GuideAnchor::End, moving.max_z, other.max_z, depth),
        (
            GuideAnchor::Center,
            moving.center().z,
            other.center().z,
            depth / 2.0,
        ),
    ]
}

/// Guides with the default tolerances.
pub fn calculate_guides(
    x: f64,
    z: f64,
    width: f64,
    depth: f64,
    elements: &[Element],
    exclude_id: Option<&ElementId>,
) -> Vec<Guide> {
    GuideCalculator::default().calculate(x, z, width, depth, elements, exclude_id)
}
