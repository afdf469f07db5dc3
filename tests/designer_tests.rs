use std::{cell::RefCell, rc::Rc};

use form_builder::{
    designer::{
        designer_state::{DesignerChange, DesignerState},
        ids::{IdSource, SequentialIds},
    },
    element::{
        element_model::{ElementType, FormElementInstance},
        properties::{PropertyValues, apply_properties},
        registry::construct,
    },
    error::DesignerError,
};

use crate::common::fixtures::{element, ids, store, text};

mod common;

// ============================================================================
// Insert / remove
// ============================================================================

#[test]
fn add_element_inserts_at_index() {
    let mut designer = store(&["a", "c"]);
    designer.add_element(1, text("b")).unwrap();
    designer.add_element(3, text("d")).unwrap();
    assert_eq!(ids(designer.elements()), vec!["a", "b", "c", "d"]);
}

#[test]
fn add_element_rejects_duplicate_id() {
    let mut designer = store(&["a"]);
    let err = designer.add_element(1, text("a")).unwrap_err();
    assert_eq!(err, DesignerError::DuplicateId("a".to_string()));
    assert_eq!(designer.len(), 1);
}

#[test]
fn add_element_rejects_index_past_end() {
    let mut designer = store(&["a"]);
    let err = designer.add_element(5, text("b")).unwrap_err();
    assert_eq!(err, DesignerError::IndexOutOfRange { index: 5, len: 1 });
}

#[test]
fn set_elements_rejects_duplicate_ids() {
    let mut designer = DesignerState::new();
    let err = designer.set_elements(vec![text("a"), text("a")]).unwrap_err();
    assert_eq!(err, DesignerError::DuplicateId("a".to_string()));
    assert!(designer.is_empty());
}

#[test]
fn remove_is_idempotent() {
    let mut once = store(&["a", "b", "c"]);
    once.remove_element("b");

    let mut twice = store(&["a", "b", "c"]);
    assert!(twice.remove_element("b").is_some());
    assert!(twice.remove_element("b").is_none());

    assert_eq!(ids(once.elements()), ids(twice.elements()));

    let mut absent = store(&["a", "c"]);
    absent.remove_element("zzz");
    assert_eq!(ids(absent.elements()), ids(once.elements()));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn removing_selected_element_clears_selection() {
    let mut designer = store(&["a", "b"]);
    designer.set_selected_element(Some("b"));
    assert_eq!(designer.selected_id(), Some("b"));

    designer.remove_element("b");
    assert!(designer.selected_element().is_none());
    assert!(designer.selected_id().is_none());
}

#[test]
fn removing_other_element_keeps_selection() {
    let mut designer = store(&["a", "b"]);
    designer.set_selected_element(Some("b"));
    designer.remove_element("a");
    assert_eq!(designer.selected_id(), Some("b"));
}

#[test]
fn selecting_unknown_id_clears_selection() {
    let mut designer = store(&["a"]);
    designer.set_selected_element(Some("a"));
    designer.set_selected_element(Some("nope"));
    assert!(designer.selected_id().is_none());
}

#[test]
fn replacing_list_drops_stale_selection() {
    let mut designer = store(&["a", "b"]);
    designer.set_selected_element(Some("b"));
    designer.set_elements(vec![text("a")]).unwrap();
    assert!(designer.selected_id().is_none());

    designer.set_selected_element(Some("a"));
    designer.set_elements(vec![text("a"), text("c")]).unwrap();
    assert_eq!(designer.selected_id(), Some("a"));
}

#[test]
fn selected_element_reflects_updates() {
    let mut designer = store(&["a"]);
    designer.set_selected_element(Some("a"));

    let updated = apply_properties(
        designer.get("a").unwrap(),
        &PropertyValues::new().with("label", "Email"),
    )
    .unwrap();
    designer.update_element("a", updated.clone()).unwrap();

    assert_eq!(designer.selected_element(), Some(&updated));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn update_replaces_in_place() {
    let mut designer = store(&["a", "b", "c"]);
    let updated = apply_properties(&text("b"), &PropertyValues::new().with("required", true)).unwrap();
    designer.update_element("b", updated.clone()).unwrap();

    assert_eq!(ids(designer.elements()), vec!["a", "b", "c"]);
    assert_eq!(designer.get("b"), Some(&updated));
}

#[test]
fn update_cannot_change_type() {
    let mut designer = store(&["a"]);
    let err = designer
        .update_element("a", construct(ElementType::NumberField, "a"))
        .unwrap_err();
    assert_eq!(
        err,
        DesignerError::TypeMismatch {
            id: "a".to_string(),
            expected: ElementType::TextField,
            found: ElementType::NumberField,
        }
    );
    assert_eq!(designer.get("a").unwrap().element_type(), ElementType::TextField);
}

#[test]
fn update_cannot_change_id() {
    let mut designer = store(&["a", "b"]);
    let err = designer.update_element("a", text("b")).unwrap_err();
    assert!(matches!(err, DesignerError::IdMismatch { .. }));
}

#[test]
fn update_of_absent_id_is_noop() {
    let mut designer = store(&["a"]);
    designer.update_element("zzz", text("zzz")).unwrap();
    assert_eq!(ids(designer.elements()), vec!["a"]);
}

// ============================================================================
// Move
// ============================================================================

#[test]
fn move_element_keeps_selection() {
    let mut designer = store(&["a", "b", "c"]);
    designer.set_selected_element(Some("a"));
    assert!(designer.move_element("a", 2).unwrap());
    assert_eq!(ids(designer.elements()), vec!["b", "c", "a"]);
    assert_eq!(designer.selected_id(), Some("a"));

    assert!(!designer.move_element("a", 2).unwrap());
    assert!(!designer.move_element("zzz", 0).unwrap());
    assert!(designer.move_element("a", 3).is_err());
}

// ============================================================================
// Invariants over mixed sequences
// ============================================================================

fn assert_unique_ids(elements: &[FormElementInstance]) {
    let mut seen: Vec<&str> = Vec::new();
    for e in elements {
        assert!(!seen.contains(&e.id()), "duplicate id {}", e.id());
        seen.push(e.id());
    }
}

#[test]
fn mixed_mutations_never_duplicate_ids_or_change_types() {
    let mut designer = DesignerState::new();
    let mut id_source = SequentialIds::new("e");
    let types = ElementType::ALL;

    for round in 0..60usize {
        let element_type = types[round % types.len()];
        let id = id_source.next_id();
        let index = (round * 7) % (designer.len() + 1);
        designer.add_element(index, construct(element_type, &id)).unwrap();

        // Re-adding an existing id is always refused
        if let Some(first) = designer.elements().first().cloned() {
            assert!(designer.add_element(0, first).is_err());
        }

        if round % 3 == 0 {
            let victim = designer.elements()[round % designer.len()].id().to_string();
            designer.remove_element(&victim);
            designer.remove_element(&victim);
        }

        if round % 4 == 0 {
            if let Some(target) = designer.elements().last().cloned() {
                let before = target.element_type();
                let swapped = construct(ElementType::TextField, target.id());
                let result = designer.update_element(target.id(), swapped);
                assert_eq!(result.is_ok(), before == ElementType::TextField);
                assert_eq!(designer.get(target.id()).unwrap().element_type(), before);
            }
        }

        assert_unique_ids(designer.elements());
    }
}

// ============================================================================
// Subscribers
// ============================================================================

#[test]
fn subscribers_see_each_applied_mutation() {
    let seen: Rc<RefCell<Vec<DesignerChange>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let mut designer = DesignerState::new();
    designer.subscribe(move |change| sink.borrow_mut().push(change.clone()));

    designer.add_element(0, text("a")).unwrap();
    designer.set_selected_element(Some("a"));
    designer.remove_element("a");
    designer.remove_element("a");
    let _ = designer.add_element(3, element(ElementType::SpacerField, "s"));

    assert_eq!(
        *seen.borrow(),
        vec![
            DesignerChange::Added {
                id: "a".to_string(),
                index: 0
            },
            DesignerChange::Selected {
                id: Some("a".to_string())
            },
            DesignerChange::Selected { id: None },
            DesignerChange::Removed {
                id: "a".to_string(),
                index: 0
            },
        ]
    );
}
