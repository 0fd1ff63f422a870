//! Tool state machine.
//!
//! The active tool decides which parts of the engine run for a pointer
//! gesture. There is always a current tool; it starts as [`ToolState::Select`]
//! and `Escape` returns to it.

use crate::model::ElementType;
use rackplan_core::{Bounds, Position};
use serde::{Deserialize, Serialize};

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolState {
    #[default]
    Select,
    Move,
    Rotate,
    DrawShelf,
    DrawDock,
    DrawOffice,
    DrawZone,
    Erase,
    Measure,
    Pan,
}

impl ToolState {
    pub const ALL: [ToolState; 10] = [
        ToolState::Select,
        ToolState::Move,
        ToolState::Rotate,
        ToolState::DrawShelf,
        ToolState::DrawDock,
        ToolState::DrawOffice,
        ToolState::DrawZone,
        ToolState::Erase,
        ToolState::Measure,
        ToolState::Pan,
    ];

    /// Element type placed by a drawing tool.
    pub fn draw_type(&self) -> Option<ElementType> {
        match self {
            Self::DrawShelf => Some(ElementType::Shelf),
            Self::DrawDock => Some(ElementType::Dock),
            Self::DrawOffice => Some(ElementType::Office),
            Self::DrawZone => Some(ElementType::Zone),
            _ => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.draw_type().is_some()
    }

    /// Tools whose pointer positions go through the snap resolver.
    pub fn runs_snapping(&self) -> bool {
        matches!(self, Self::Move) || self.is_drawing()
    }

    /// Tools that show alignment guides while dragging.
    pub fn runs_guides(&self) -> bool {
        self.runs_snapping()
    }

    /// Tools that change elements.
    pub fn mutates_elements(&self) -> bool {
        matches!(self, Self::Move | Self::Rotate | Self::Erase) || self.is_drawing()
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::DrawShelf => "draw_shelf",
            Self::DrawDock => "draw_dock",
            Self::DrawOffice => "draw_office",
            Self::DrawZone => "draw_zone",
            Self::Erase => "erase",
            Self::Measure => "measure",
            Self::Pan => "pan",
        }
    }
}

impl std::fmt::Display for ToolState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Rubber-band preview of an element being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPreview {
    pub element_type: ElementType,
    pub start: Position,
    pub current: Position,
}

impl DrawPreview {
    /// Box spanned by the gesture so far.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.start.x, self.start.z, self.current.x, self.current.z)
    }
}

/// Two-point distance measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub start: Position,
    pub end: Position,
}

impl Measurement {
    pub fn distance(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn dx(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn dz(&self) -> f64 {
        (self.end.z - self.start.z).abs()
    }
}

/// Current tool plus any in-progress gesture state that belongs to it.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    current: ToolState,
    pending_type: Option<ElementType>,
    preview: Option<DrawPreview>,
    measurement: Option<Measurement>,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ToolState {
        self.current
    }

    /// Switches tool. Any in-progress preview or measurement is discarded,
    /// even when re-selecting the current tool.
    pub fn set_tool(&mut self, tool: ToolState) {
        if tool != self.current {
            tracing::info!("Tool changed: {} -> {}", self.current, tool);
        }
        self.current = tool;
        self.pending_type = tool.draw_type();
        self.preview = None;
        self.measurement = None;
    }

    /// Returns to the select tool.
    pub fn escape(&mut self) {
        self.set_tool(ToolState::Select);
    }

    /// Element type the next placement gesture creates.
    pub fn pending_type(&self) -> Option<ElementType> {
        self.pending_type
    }

    /// Starts a draw preview. Ignored outside drawing tools.
    pub fn begin_preview(&mut self, start: Position) -> bool {
        match self.pending_type {
            Some(element_type) => {
                self.preview = Some(DrawPreview {
                    element_type,
                    start,
                    current: start,
                });
                true
            }
            None => false,
        }
    }

    pub fn update_preview(&mut self, current: Position) {
        if let Some(preview) = &mut self.preview {
            preview.current = current;
        }
    }

    pub fn preview(&self) -> Option<&DrawPreview> {
        self.preview.as_ref()
    }

    /// Ends the draw gesture and hands back its preview.
    pub fn take_preview(&mut self) -> Option<DrawPreview> {
        self.preview.take()
    }

    /// Starts or restarts a measurement. Ignored outside the measure tool.
    pub fn begin_measure(&mut self, start: Position) -> bool {
        if self.current != ToolState::Measure {
            return false;
        }
        self.measurement = Some(Measurement { start, end: start });
        true
    }

    pub fn update_measure(&mut self, end: Position) -> Option<Measurement> {
        let measurement = self.measurement.as_mut()?;
        measurement.end = end;
        Some(*measurement)
    }

    pub fn measurement(&self) -> Option<Measurement> {
        self.measurement
    }
}
