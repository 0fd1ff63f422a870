use proptest::prelude::*;
use rackplan_designer::{
    check_collision, validate_layout, Element, ElementId, Envelope, MachineryClass,
    ValidationRules, WarningKind,
};

fn count(elements: &[Element], envelope: &Envelope, kind: WarningKind) -> usize {
    validate_layout(elements, envelope)
        .iter()
        .filter(|w| w.kind == kind)
        .count()
}

#[test]
fn test_touching_shelves_are_neither_aisle_nor_collision() {
    let a = Element::shelf("A", 0.0, 0.0, 2.7, 1.1);
    let b = Element::shelf("B", 2.7, 0.0, 2.7, 1.1);
    let elements = vec![a.clone(), b.clone()];
    let envelope = Envelope::default();

    assert_eq!(count(&elements, &envelope, WarningKind::AisleNarrow), 0);
    assert_eq!(count(&elements, &envelope, WarningKind::Collision), 0);
    assert!(!check_collision(&a, &b));
}

#[test]
fn test_dock_blocked_by_shelf() {
    let elements = vec![
        Element::dock("dock", 10.0, 0.0, 3.5),
        Element::shelf("shelf", 10.0, 1.0, 3.0, 1.0),
    ];
    let warnings = validate_layout(&elements, &Envelope::default());
    let blocked: Vec<_> = warnings
        .iter()
        .filter(|w| w.kind == WarningKind::DockBlocked)
        .collect();
    assert_eq!(blocked.len(), 1);
    assert!(blocked[0].references(&ElementId::from("dock")));
    assert!(blocked[0].references(&ElementId::from("shelf")));
    assert_eq!(count(&elements, &Envelope::default(), WarningKind::Collision), 0);
}

#[test]
fn test_shelf_beyond_maneuver_depth_is_fine() {
    let elements = vec![
        Element::dock("dock", 10.0, 0.0, 3.5),
        Element::shelf("shelf", 10.0, 4.5, 3.0, 1.0),
    ];
    assert_eq!(
        count(&elements, &Envelope::default(), WarningKind::DockBlocked),
        0
    );
}

#[test]
fn test_far_wall_dock_is_blocked_on_its_open_side() {
    let shelf_in_front = Element::shelf("shelf", 10.0, 17.0, 3.0, 1.0);
    let dock = Element::dock("dock", 10.0, 20.0, 3.5);

    let facing_wall = vec![dock.clone(), shelf_in_front.clone()];
    assert_eq!(
        count(&facing_wall, &Envelope::default(), WarningKind::DockBlocked),
        0
    );

    let facing_floor = vec![dock.with_rotation(std::f64::consts::PI), shelf_in_front];
    assert_eq!(
        count(&facing_floor, &Envelope::default(), WarningKind::DockBlocked),
        1
    );
}

#[test]
fn test_narrow_aisle_references_both_shelves() {
    let elements = vec![
        Element::shelf("left", 0.0, 5.0, 2.7, 1.1),
        Element::shelf("right", 5.0, 5.05, 2.7, 1.1),
    ];
    let warnings = validate_layout(&elements, &Envelope::default());
    let narrow: Vec<_> = warnings
        .iter()
        .filter(|w| w.kind == WarningKind::AisleNarrow)
        .collect();
    assert_eq!(narrow.len(), 1);
    assert_eq!(
        narrow[0].element_ids,
        vec![ElementId::from("left"), ElementId::from("right")]
    );
}

#[test]
fn test_trilateral_accepts_narrower_aisle() {
    let elements = vec![
        Element::shelf("a", 0.0, 0.0, 2.7, 1.1),
        Element::shelf("b", 4.5, 0.0, 2.7, 1.1),
    ];
    let rules = ValidationRules::with_machinery(MachineryClass::Trilateral);
    let warnings = rules.validate(&elements, &Envelope::default());
    assert!(warnings.iter().all(|w| w.kind != WarningKind::AisleNarrow));
}

#[test]
fn test_half_built_element_does_not_break_validation() {
    let json = r#"[{"id": "s", "type": "shelf", "dimensions": {"length": null, "depth": -3}}]"#;
    let elements: Vec<Element> = serde_json::from_str(json).unwrap();
    let warnings = validate_layout(&elements, &Envelope::default());
    assert_eq!(count(&elements, &Envelope::default(), WarningKind::OutOfBounds), 0);
    assert!(warnings.iter().all(|w| w.kind != WarningKind::Collision));
}

fn arb_element(id: &'static str) -> impl Strategy<Value = Element> {
    (-20.0..60.0f64, -20.0..40.0f64, 0.1..10.0f64, 0.1..10.0f64)
        .prop_map(move |(x, z, l, w)| Element::zone(id, x, z, l, w))
}

proptest! {
    #[test]
    fn prop_collision_is_symmetric(a in arb_element("a"), b in arb_element("b")) {
        prop_assert_eq!(check_collision(&a, &b), check_collision(&b, &a));
    }

    #[test]
    fn prop_out_of_bounds_at_most_once_per_element(
        a in arb_element("a"),
        b in arb_element("b"),
    ) {
        let envelope = Envelope::default();
        let elements = vec![a.clone(), b];
        let warnings = validate_layout(&elements, &envelope);
        let for_a = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::OutOfBounds && w.references(&a.id))
            .count();
        let inside = envelope.bounds().contains(&a.bounds());
        prop_assert_eq!(for_a, if inside { 0 } else { 1 });
    }
}
