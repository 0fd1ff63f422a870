use proptest::prelude::*;
use rackplan_designer::snapping::{object_anchors, snap_to_grid};
use rackplan_designer::{
    Element, ElementId, Envelope, Position, SnapConfig, SnapResolver, SnapResult, SnapTarget,
};

fn grid_only() -> SnapConfig {
    SnapConfig {
        wall_snap: false,
        object_snap: false,
        ..SnapConfig::default()
    }
}

#[test]
fn test_grid_example() {
    let resolver = SnapResolver::new(SnapConfig::default(), 1.0);
    let result = resolver.snap_position(4.3, 12.5, &[], &Envelope::default(), None);
    assert_eq!(result.x, 4.0);
    assert_eq!(result.snapped_to, Some(SnapTarget::Grid));
}

#[test]
fn test_nothing_in_reach_returns_raw_input() {
    let mut config = grid_only();
    config.snap_distance = 0.1;
    let resolver = SnapResolver::new(config, 1.0);
    let result = resolver.snap_position(4.4, 7.6, &[], &Envelope::default(), None);
    assert_eq!(result, SnapResult::unsnapped(4.4, 7.6));
}

#[test]
fn test_axes_resolve_from_different_sources() {
    let config = SnapConfig {
        object_snap: false,
        ..SnapConfig::default()
    };
    let resolver = SnapResolver::new(config, 2.0);
    // X is near a grid line, Z near the far wall.
    let result = resolver.snap_position(6.2, 24.7, &[], &Envelope::new(40.0, 25.0, 10.0), None);
    assert_eq!(result.x, 6.0);
    assert_eq!(result.x_source, Some(SnapTarget::Grid));
    assert_eq!(result.z, 25.0);
    assert_eq!(result.z_source, Some(SnapTarget::Wall));
}

#[test]
fn test_excluded_element_is_not_an_anchor() {
    let config = SnapConfig {
        grid_snap: false,
        ..SnapConfig::default()
    };
    let resolver = SnapResolver::new(config, 1.0);
    let elements = vec![Element::zone("self", 10.0, 10.0, 3.0, 3.0)];
    let id = ElementId::from("self");

    let hit = resolver.snap_position(10.2, 10.1, &elements, &Envelope::default(), None);
    assert_eq!(hit.snapped_to, Some(SnapTarget::Object));
    assert_eq!(hit.position(), Position::new(10.0, 10.0));

    let miss = resolver.snap_position(10.2, 10.1, &elements, &Envelope::default(), Some(&id));
    assert_eq!(miss.snapped_to, None);
}

#[test]
fn test_anchor_flags() {
    let element = Element::zone("z", 0.0, 0.0, 4.0, 4.0);
    assert_eq!(object_anchors(&element, &SnapConfig::default()).len(), 9);

    let config = SnapConfig {
        endpoint_snap: false,
        midpoint_snap: false,
        ..SnapConfig::default()
    };
    let anchors = object_anchors(&element, &config);
    assert_eq!(anchors.as_slice(), &[Position::new(2.0, 2.0)]);
}

#[test]
fn test_ortho_works_with_snapping_disabled() {
    let config = SnapConfig {
        enabled: false,
        ortho_mode: true,
        ..SnapConfig::default()
    };
    let mut resolver = SnapResolver::new(config, 1.0);
    resolver.set_drag_origin(Some(Position::new(0.0, 0.0)));
    let result = resolver.snap_position(0.4, 5.3, &[], &Envelope::default(), None);
    assert_eq!(result.x, 0.0);
    assert_eq!(result.z, 5.3);
    assert_eq!(result.snapped_to, Some(SnapTarget::Ortho));
}

proptest! {
    #[test]
    fn prop_grid_snap_returns_exact_multiple(k in -50i32..50, offset in -0.49..0.49f64) {
        let resolver = SnapResolver::new(grid_only(), 1.0);
        let x = f64::from(k) + offset;
        let result = resolver.snap_position(x, 100.5, &[], &Envelope::default(), None);
        prop_assert_eq!(result.x, f64::from(k));
        prop_assert_eq!(result.x_source, Some(SnapTarget::Grid));
    }

    #[test]
    fn prop_snap_to_grid_never_moves_beyond_distance(
        value in -100.0..100.0f64,
        grid in 0.1..5.0f64,
        distance in 0.0..2.0f64,
    ) {
        if let Some(snapped) = snap_to_grid(value, grid, distance) {
            prop_assert!((snapped - value).abs() <= distance + 1e-12);
        }
    }
}
