//! Layout validation.
//!
//! A full pass over the element set producing warnings for narrow aisles,
//! blocked docks, collisions, elements outside the envelope and shelf
//! density. The pass is not incremental: each call returns the complete
//! list for the elements it was given.

use crate::model::{Element, ElementId, ElementKind};
use rackplan_core::{Bounds, Envelope, MachineryClass, Position, GEOMETRY_EPSILON};
use serde::Serialize;

/// Depth of the manoeuvring area in front of a dock.
pub const DEFAULT_DOCK_MANEUVER_DEPTH: f64 = 4.0;
/// Two shelves share a row (or column) when both edges differ by at most this.
pub const ROW_ALIGNMENT_TOLERANCE: f64 = 0.1;
pub const DEFAULT_LOW_DENSITY: f64 = 0.20;
pub const DEFAULT_HIGH_DENSITY: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AisleNarrow,
    DockBlocked,
    Collision,
    OutOfBounds,
    LowDensity,
    HighDensity,
}

impl WarningKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::AisleNarrow | Self::DockBlocked | Self::Collision => Severity::Error,
            Self::OutOfBounds | Self::HighDensity => Severity::Warning,
            Self::LowDensity => Severity::Info,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::AisleNarrow => "aisle_narrow",
            Self::DockBlocked => "dock_blocked",
            Self::Collision => "collision",
            Self::OutOfBounds => "out_of_bounds",
            Self::LowDensity => "low_density",
            Self::HighDensity => "high_density",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
    pub element_ids: Vec<ElementId>,
    /// Where to draw the marker; `None` for layout-wide findings.
    pub position: Option<Position>,
}

impl Warning {
    pub fn new(
        kind: WarningKind,
        message: impl Into<String>,
        element_ids: Vec<ElementId>,
        position: Option<Position>,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            element_ids,
            position,
        }
    }

    pub fn references(&self, id: &ElementId) -> bool {
        self.element_ids.contains(id)
    }
}

/// Warning counts per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WarningSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl WarningSummary {
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        let mut summary = Self::default();
        for warning in warnings {
            match warning.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl std::fmt::Display for WarningSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} errors, {} warnings, {} info",
            self.errors, self.warnings, self.infos
        )
    }
}

/// Thresholds the validator applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub machinery: MachineryClass,
    pub dock_maneuver_depth: f64,
    pub low_density: f64,
    pub high_density: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            machinery: MachineryClass::default(),
            dock_maneuver_depth: DEFAULT_DOCK_MANEUVER_DEPTH,
            low_density: DEFAULT_LOW_DENSITY,
            high_density: DEFAULT_HIGH_DENSITY,
        }
    }
}

impl ValidationRules {
    pub fn with_machinery(machinery: MachineryClass) -> Self {
        Self {
            machinery,
            ..Self::default()
        }
    }

    /// Runs every check and returns the complete warning list.
    pub fn validate(&self, elements: &[Element], envelope: &Envelope) -> Vec<Warning> {
        let mut warnings = Vec::new();
        self.check_aisles(elements, &mut warnings);
        self.check_docks(elements, &mut warnings);
        check_collisions(elements, &mut warnings);
        check_bounds(elements, envelope, &mut warnings);
        self.check_density(elements, envelope, &mut warnings);

        tracing::debug!(
            "Validated {} elements: {}",
            elements.len(),
            WarningSummary::from_warnings(&warnings)
        );
        warnings
    }

    fn check_aisles(&self, elements: &[Element], warnings: &mut Vec<Warning>) {
        let min_aisle = self.machinery.min_aisle_width();
        let shelves: Vec<(&Element, Bounds)> = elements
            .iter()
            .filter(|e| e.is_shelf())
            .map(|e| (e, e.bounds()))
            .collect();

        for (i, (a, ab)) in shelves.iter().enumerate() {
            for (b, bb) in shelves.iter().skip(i + 1) {
                let Some((gap, position)) = facing_gap(ab, bb) else {
                    continue;
                };
                if gap > GEOMETRY_EPSILON && gap < min_aisle {
                    warnings.push(Warning::new(
                        WarningKind::AisleNarrow,
                        format!(
                            "Aisle between {} and {} is {:.2} m wide; {} needs at least {:.2} m",
                            a.display_name(),
                            b.display_name(),
                            gap,
                            self.machinery.label(),
                            min_aisle
                        ),
                        vec![a.id.clone(), b.id.clone()],
                        Some(position),
                    ));
                }
            }
        }
    }

    fn check_docks(&self, elements: &[Element], warnings: &mut Vec<Warning>) {
        for dock in elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Dock(_)))
        {
            let area = self.maneuver_area(dock);
            for shelf in elements.iter().filter(|e| e.is_shelf()) {
                if area.intersects(&shelf.bounds()) {
                    warnings.push(Warning::new(
                        WarningKind::DockBlocked,
                        format!(
                            "{} blocks the manoeuvring area of {}",
                            shelf.display_name(),
                            dock.display_name()
                        ),
                        vec![dock.id.clone(), shelf.id.clone()],
                        Some(area.center()),
                    ));
                }
            }
        }
    }

    /// Dock footprint extended by the manoeuvring depth in front of the
    /// door. An unrotated dock faces +Z; each quarter turn swings the face
    /// to +X, -Z and -X in turn.
    pub fn maneuver_area(&self, dock: &Element) -> Bounds {
        let b = dock.bounds();
        let depth = self.dock_maneuver_depth;
        match dock.quarter_turns() {
            1 => Bounds::new(b.min_x, b.min_z, b.max_x + depth, b.max_z),
            2 => Bounds::new(b.min_x, b.min_z - depth, b.max_x, b.max_z),
            3 => Bounds::new(b.min_x - depth, b.min_z, b.max_x, b.max_z),
            _ => Bounds::new(b.min_x, b.min_z, b.max_x, b.max_z + depth),
        }
    }

    fn check_density(
        &self,
        elements: &[Element],
        envelope: &Envelope,
        warnings: &mut Vec<Warning>,
    ) {
        let area = envelope.floor_area();
        if area <= 0.0 || !elements.iter().any(Element::is_shelf) {
            return;
        }

        let density = shelf_density(elements, envelope);
        if density < self.low_density {
            warnings.push(Warning::new(
                WarningKind::LowDensity,
                format!(
                    "Shelving covers {:.0}% of the floor (below {:.0}%)",
                    density * 100.0,
                    self.low_density * 100.0
                ),
                Vec::new(),
                None,
            ));
        } else if density > self.high_density {
            warnings.push(Warning::new(
                WarningKind::HighDensity,
                format!(
                    "Shelving covers {:.0}% of the floor (above {:.0}%)",
                    density * 100.0,
                    self.high_density * 100.0
                ),
                Vec::new(),
                None,
            ));
        }
    }
}

/// Gap between two shelves that share a row (gap along X) or a column
/// (gap along Z), with the midpoint of the gap.
fn facing_gap(a: &Bounds, b: &Bounds) -> Option<(f64, Position)> {
    let same_row = (a.min_z - b.min_z).abs() <= ROW_ALIGNMENT_TOLERANCE
        && (a.max_z - b.max_z).abs() <= ROW_ALIGNMENT_TOLERANCE;
    let same_column = (a.min_x - b.min_x).abs() <= ROW_ALIGNMENT_TOLERANCE
        && (a.max_x - b.max_x).abs() <= ROW_ALIGNMENT_TOLERANCE;

    if same_row {
        let (left, right) = if a.min_x <= b.min_x { (a, b) } else { (b, a) };
        let gap = right.min_x - left.max_x;
        let z = (a.center().z + b.center().z) / 2.0;
        Some((gap, Position::new(left.max_x + gap / 2.0, z)))
    } else if same_column {
        let (top, bottom) = if a.min_z <= b.min_z { (a, b) } else { (b, a) };
        let gap = bottom.min_z - top.max_z;
        let x = (a.center().x + b.center().x) / 2.0;
        Some((gap, Position::new(x, top.max_z + gap / 2.0)))
    } else {
        None
    }
}

fn check_collisions(elements: &[Element], warnings: &mut Vec<Warning>) {
    for (i, a) in elements.iter().enumerate() {
        for b in elements.iter().skip(i + 1) {
            if let Some(overlap) = a.bounds().intersection(&b.bounds()) {
                warnings.push(Warning::new(
                    WarningKind::Collision,
                    format!("{} overlaps {}", a.display_name(), b.display_name()),
                    vec![a.id.clone(), b.id.clone()],
                    Some(overlap.center()),
                ));
            }
        }
    }
}

fn check_bounds(elements: &[Element], envelope: &Envelope, warnings: &mut Vec<Warning>) {
    let limits = envelope.bounds();
    for element in elements {
        let bounds = element.bounds();
        if !limits.contains(&bounds) {
            warnings.push(Warning::new(
                WarningKind::OutOfBounds,
                format!("{} extends outside the warehouse", element.display_name()),
                vec![element.id.clone()],
                Some(bounds.center()),
            ));
        }
    }
}

/// Strict footprint overlap. Touching elements do not collide.
pub fn check_collision(a: &Element, b: &Element) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Total shelf footprint divided by the envelope floor area.
pub fn shelf_density(elements: &[Element], envelope: &Envelope) -> f64 {
    let area = envelope.floor_area();
    if area <= 0.0 {
        return 0.0;
    }
    let covered: f64 = elements
        .iter()
        .filter(|e| e.is_shelf())
        .map(|e| e.bounds().area())
        .sum();
    covered / area
}

/// Validates with the default rules (retractil machinery).
pub fn validate_layout(elements: &[Element], envelope: &Envelope) -> Vec<Warning> {
    ValidationRules::default().validate(elements, envelope)
}
