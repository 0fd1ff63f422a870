//! # RackPlan
//!
//! Interactive layout editing for warehouse floor plans: shelves, loading
//! docks, offices, service rooms and zones placed on a rectangular envelope,
//! with snapping, alignment guides, undo/redo and continuous validation of
//! aisle widths, dock clearance, collisions, bounds and storage density.
//!
//! ## Architecture
//!
//! RackPlan is organized as a workspace with multiple crates:
//!
//! 1. **rackplan-core** - Geometry, machinery classes, snap configuration, errors
//! 2. **rackplan-designer** - The layout editor, snapping, guides, validator, history
//! 3. **rackplan-settings** - Configuration files and their validation
//! 4. **rackplan** - Command-line binary that integrates all crates

pub mod cli;

pub use rackplan_core::{
    Bounds, EditError, Envelope, LayoutError, MachineryClass, Position, SnapConfig,
};

pub use rackplan_designer::{
    DocumentStore, Element, ElementId, GuideCalculator, InMemoryDocument, LayoutEditor,
    SnapResult, SnapTarget, ToolState, ValidationRules, Warning, WarningSummary,
};

pub use rackplan_settings::{Config, ConfigFormat, SettingsError};

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so command results on stdout stay machine readable
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Builds an editor from validated configuration.
pub fn editor_from_config(config: &Config) -> LayoutEditor {
    let rules = ValidationRules {
        machinery: config.editor.machinery,
        dock_maneuver_depth: config.validation.dock_maneuver_depth,
        low_density: config.validation.low_density,
        high_density: config.validation.high_density,
    };
    let guides = GuideCalculator::new(config.guides.threshold, config.guides.dedupe_tolerance);

    LayoutEditor::new()
        .with_snap_config(config.editor.snap)
        .with_grid_size(config.editor.grid_size)
        .with_grid_visible(config.editor.grid_visible)
        .with_max_history(config.editor.max_history)
        .with_rules(rules)
        .with_guide_calculator(guides)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutFile {
    Elements(Vec<Element>),
    Document(InMemoryDocument),
}

/// Reads a layout JSON file: either `{ "envelope": .., "elements": [..] }`
/// or a bare element array placed in the default envelope.
pub fn load_layout(path: &Path) -> anyhow::Result<InMemoryDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    parse_layout(&content).with_context(|| format!("Invalid layout {}", path.display()))
}

pub fn parse_layout(content: &str) -> anyhow::Result<InMemoryDocument> {
    let document = match serde_json::from_str(content)? {
        LayoutFile::Elements(elements) => {
            InMemoryDocument::with_elements(Envelope::default(), elements)
        }
        LayoutFile::Document(document) => document,
    };
    document.envelope().validate()?;
    tracing::debug!("Parsed layout with {} elements", document.len());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_from_config() {
        let mut config = Config::default();
        config.editor.grid_size = 0.5;
        config.editor.grid_visible = false;
        config.editor.machinery = MachineryClass::Trilateral;
        config.validation.dock_maneuver_depth = 6.0;

        let editor = editor_from_config(&config);
        assert_eq!(editor.grid_size(), 0.5);
        assert!(!editor.grid_visible());
        assert_eq!(editor.machinery(), MachineryClass::Trilateral);
        assert_eq!(editor.rules().dock_maneuver_depth, 6.0);
    }

    #[test]
    fn test_parse_bare_element_array() {
        let doc = parse_layout(
            r#"[{"id": "s1", "type": "shelf", "position": {"x": 1, "z": 2},
                 "dimensions": {"length": 2.7, "depth": 1.1}}]"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.envelope(), Envelope::default());
    }

    #[test]
    fn test_parse_document_with_envelope() {
        let doc = parse_layout(
            r#"{"envelope": {"length": 20, "width": 10, "height": 8},
                "elements": [{"id": "d1", "type": "dock", "position": {"x": 0, "z": 0}}]}"#,
        )
        .unwrap();
        assert_eq!(doc.envelope().length, 20.0);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_parse_rejects_degenerate_envelope() {
        let err = parse_layout(r#"{"envelope": {"length": 0, "width": 10}, "elements": []}"#)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::InvalidEnvelope {
                length: 0.0,
                width: 10.0
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_layout("{\"elements\": 3}").is_err());
    }
}
