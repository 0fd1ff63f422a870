use rackplan_designer::{calculate_guides, Element, ElementId, GuideAnchor, GuideKind};

#[test]
fn test_center_alignment_on_both_axes() {
    let elements = vec![Element::office("office", 10.0, 10.0, 6.0, 4.0)];
    // Moving 2 x 2 box whose centre sits at (13.3, 12.2); office centre is (13, 12).
    let guides = calculate_guides(12.3, 11.2, 2.0, 2.0, &elements, None);

    let vertical = guides
        .iter()
        .find(|g| g.kind == GuideKind::Vertical && g.anchor == GuideAnchor::Center)
        .unwrap();
    assert_eq!(vertical.position, 13.0);
    assert_eq!(vertical.origin_coordinate(), 12.0);

    let horizontal = guides
        .iter()
        .find(|g| g.kind == GuideKind::Horizontal && g.anchor == GuideAnchor::Center)
        .unwrap();
    assert_eq!(horizontal.position, 12.0);
}

#[test]
fn test_guides_are_only_emitted_within_threshold() {
    let elements = vec![Element::shelf("s", 0.0, 0.0, 2.7, 1.1)];
    let near = calculate_guides(0.9, 30.0, 10.0, 1.0, &elements, None);
    assert!(near
        .iter()
        .any(|g| g.kind == GuideKind::Vertical && g.position == 0.0));

    let far = calculate_guides(1.2, 30.0, 10.0, 1.0, &elements, None);
    assert!(far.iter().all(|g| g.position != 0.0));
}

#[test]
fn test_labels_name_the_other_element() {
    let mut shelf = Element::shelf("s", 0.0, 0.0, 2.7, 1.1);
    shelf
        .properties
        .insert("name".to_string(), serde_json::json!("Row A"));
    let guides = calculate_guides(0.0, 20.0, 2.7, 1.1, &[shelf], None);
    assert!(!guides.is_empty());
    assert!(guides.iter().all(|g| g.label.starts_with("Row A")));
}

#[test]
fn test_no_duplicates_within_tolerance() {
    let elements: Vec<Element> = (0..5)
        .map(|i| {
            let x = 5.0 + f64::from(i) * 0.01;
            Element::shelf(&format!("s{i}"), x, f64::from(i) * 3.0, 2.7, 1.1)
        })
        .collect();
    let guides = calculate_guides(5.2, 40.0, 2.7, 1.1, &elements, Some(&ElementId::from("s0")));
    let starts = guides
        .iter()
        .filter(|g| g.kind == GuideKind::Vertical && g.anchor == GuideAnchor::Start)
        .count();
    assert_eq!(starts, 1);
}
