use proptest::prelude::*;
use rackplan_designer::{Element, HistoryManager, HistoryPhase, HistorySnapshot};

fn snapshot(n: usize) -> HistorySnapshot {
    let elements = (0..n)
        .map(|i| Element::shelf(&format!("s{i}"), i as f64 * 3.0, 0.0, 2.7, 1.1))
        .collect();
    HistorySnapshot::new(elements, format!("step {n}"))
}

#[test]
fn test_undo_then_redo_restores_snapshot() {
    let mut history = HistoryManager::new();
    for n in 0..4 {
        history.push(snapshot(n));
    }
    let before = history.current().cloned().unwrap();
    history.undo().unwrap();
    let redone = history.redo().unwrap();
    assert_eq!(redone, before);
}

#[test]
fn test_undo_returns_previous_state() {
    let mut history = HistoryManager::new();
    history.push(snapshot(0));
    history.push(snapshot(1));
    let undone = history.undo().unwrap();
    assert_eq!(undone.description, "step 0");
    assert!(undone.elements.is_empty());
    assert!(history.undo().is_none());
}

#[test]
fn test_apply_phase_blocks_pushes() {
    let mut history = HistoryManager::new();
    history.push(snapshot(0));
    history.begin_apply();
    assert_eq!(history.phase(), HistoryPhase::ApplyingHistory);
    history.push(snapshot(1));
    history.end_apply();
    assert_eq!(history.len(), 1);
}

proptest! {
    #[test]
    fn prop_sequential_pushes_bound_length_and_index(n in 1usize..120, max in 1usize..60) {
        let mut history = HistoryManager::with_max_length(max);
        for i in 0..n {
            history.push(HistorySnapshot::new(Vec::new(), format!("{i}")));
        }
        let expected = n.min(max);
        prop_assert_eq!(history.len(), expected);
        prop_assert_eq!(history.index(), Some(expected - 1));
    }

    #[test]
    fn prop_undo_redo_round_trip(n in 2usize..30, undos in 1usize..30) {
        let mut history = HistoryManager::new();
        for i in 0..n {
            history.push(HistorySnapshot::new(Vec::new(), format!("{i}")));
        }
        let undos = undos.min(n - 1);
        for _ in 0..undos {
            prop_assert!(history.undo().is_some());
        }
        let current = history.current().cloned();
        history.undo();
        if undos < n - 1 {
            history.redo();
        }
        prop_assert_eq!(history.current().cloned(), current);
    }
}
