//! Snapping configuration.

use serde::{Deserialize, Serialize};

/// Which snapping heuristics run and how far they reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Master switch for every heuristic except the ortho lock.
    pub enabled: bool,
    pub grid_snap: bool,
    /// Snap to anchor points (corners, centres, midpoints) of other elements.
    pub object_snap: bool,
    /// Snap to the envelope walls.
    pub wall_snap: bool,
    /// Include element corners as object anchors.
    pub endpoint_snap: bool,
    /// Include edge midpoints as object anchors.
    pub midpoint_snap: bool,
    /// Maximum distance (metres) at which a candidate captures the pointer.
    pub snap_distance: f64,
    /// Lock drags to the dominant axis.
    pub ortho_mode: bool,
}

impl SnapConfig {
    pub const DEFAULT_SNAP_DISTANCE: f64 = 0.5;

    /// Sets the snap distance. Negative or non-finite values are clamped to 0.
    pub fn set_snap_distance(&mut self, distance: f64) {
        if !distance.is_finite() || distance < 0.0 {
            tracing::warn!("Invalid snap distance {}, clamping to 0", distance);
            self.snap_distance = 0.0;
        } else {
            self.snap_distance = distance;
        }
    }

    /// Snap distance safe for comparisons.
    pub fn effective_distance(&self) -> f64 {
        if self.snap_distance.is_finite() {
            self.snap_distance.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_snap: true,
            object_snap: true,
            wall_snap: true,
            endpoint_snap: true,
            midpoint_snap: true,
            snap_distance: Self::DEFAULT_SNAP_DISTANCE,
            ortho_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SnapConfig::default();
        assert!(config.enabled);
        assert!(!config.ortho_mode);
        assert_eq!(config.snap_distance, 0.5);
    }

    #[test]
    fn test_negative_distance_is_clamped() {
        let mut config = SnapConfig::default();
        config.set_snap_distance(-1.0);
        assert_eq!(config.snap_distance, 0.0);
        config.set_snap_distance(f64::NAN);
        assert_eq!(config.effective_distance(), 0.0);
        config.set_snap_distance(0.25);
        assert_eq!(config.effective_distance(), 0.25);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: SnapConfig = serde_json::from_str(r#"{"grid_snap": false}"#).unwrap();
        assert!(!config.grid_snap);
        assert!(config.object_snap);
        assert_eq!(config.snap_distance, 0.5);
    }
}
