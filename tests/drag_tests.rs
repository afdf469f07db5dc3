use form_builder::{
    designer::{
        canvas::{render_canvas, render_designer_page, render_sidebar},
        designer_state::DesignerState,
        drag::{
            DragEngine, DragEvent, DragOverlay, DragSource, DragState, DropOperation, DropTarget,
            resolve_drop,
        },
        ids::SequentialIds,
    },
    element::{element_model::ElementType, registry::construct},
};

use crate::common::fixtures::{ids, store};

mod common;

fn palette(element_type: ElementType) -> DragSource {
    DragSource::PaletteButton { element_type }
}

fn handle(id: &str) -> DragSource {
    DragSource::DesignerElement {
        element_id: id.to_string(),
        element_type: ElementType::TextField,
    }
}

/// Run a full gesture: start, hover, drop.
fn drop_onto(
    engine: &mut DragEngine,
    designer: &mut DesignerState,
    id_source: &mut SequentialIds,
    active: DragSource,
    over: DropTarget,
) {
    engine
        .handle(DragEvent::Start { active }, designer, id_source)
        .unwrap();
    engine
        .handle(
            DragEvent::Over {
                over: Some(over.clone()),
            },
            designer,
            id_source,
        )
        .unwrap();
    engine
        .handle(DragEvent::End { over: Some(over) }, designer, id_source)
        .unwrap();
}

// ============================================================================
// Pure drop decision
// ============================================================================

#[test]
fn palette_onto_canvas_appends() {
    let designer = store(&["a"]);
    let op = resolve_drop(
        Some(&palette(ElementType::DateField)),
        Some(&DropTarget::DesignerDropArea),
        designer.elements(),
    );
    assert_eq!(
        op,
        Some(DropOperation::AppendNew {
            element_type: ElementType::DateField
        })
    );
}

#[test]
fn palette_onto_halves_inserts_before_or_after() {
    let designer = store(&["a", "b"]);
    let source = palette(ElementType::TextField);

    assert_eq!(
        resolve_drop(Some(&source), Some(&DropTarget::top("b")), designer.elements()),
        Some(DropOperation::InsertNew {
            element_type: ElementType::TextField,
            index: 1
        })
    );
    assert_eq!(
        resolve_drop(Some(&source), Some(&DropTarget::bottom("b")), designer.elements()),
        Some(DropOperation::InsertNew {
            element_type: ElementType::TextField,
            index: 2
        })
    );
}

#[test]
fn reorder_indices() {
    let designer = store(&["a", "b", "c"]);
    let elements = designer.elements();

    assert_eq!(
        resolve_drop(Some(&handle("a")), Some(&DropTarget::bottom("c")), elements),
        Some(DropOperation::Move {
            element_id: "a".to_string(),
            from: 0,
            to: 2
        })
    );
    assert_eq!(
        resolve_drop(Some(&handle("c")), Some(&DropTarget::top("a")), elements),
        Some(DropOperation::Move {
            element_id: "c".to_string(),
            from: 2,
            to: 0
        })
    );
    // Index of the target before removal, used on the shortened list
    assert_eq!(
        resolve_drop(Some(&handle("a")), Some(&DropTarget::top("c")), elements),
        Some(DropOperation::Move {
            element_id: "a".to_string(),
            from: 0,
            to: 2
        })
    );
    assert_eq!(
        resolve_drop(Some(&handle("a")), Some(&DropTarget::top("b")), elements),
        Some(DropOperation::Move {
            element_id: "a".to_string(),
            from: 0,
            to: 1
        })
    );
    assert_eq!(
        resolve_drop(Some(&handle("c")), Some(&DropTarget::bottom("a")), elements),
        Some(DropOperation::Move {
            element_id: "c".to_string(),
            from: 2,
            to: 1
        })
    );
}

#[test]
fn move_back_into_own_slot_is_a_noop() {
    let mut designer = store(&["a", "b", "c"]);
    let op = resolve_drop(Some(&handle("b")), Some(&DropTarget::bottom("a")), designer.elements());
    assert_eq!(
        op,
        Some(DropOperation::Move {
            element_id: "b".to_string(),
            from: 1,
            to: 1
        })
    );
    assert!(op.as_ref().is_some_and(DropOperation::is_noop));

    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();
    drop_onto(&mut engine, &mut designer, &mut id_source, handle("b"), DropTarget::bottom("a"));
    assert_eq!(ids(designer.elements()), vec!["a", "b", "c"]);
}

#[test]
fn drops_that_change_nothing_resolve_to_none() {
    let designer = store(&["a", "b", "c"]);
    let elements = designer.elements();

    // Onto itself
    assert_eq!(resolve_drop(Some(&handle("b")), Some(&DropTarget::top("b")), elements), None);
    assert_eq!(resolve_drop(Some(&handle("c")), Some(&DropTarget::bottom("c")), elements), None);
    // Element on the bare canvas
    assert_eq!(
        resolve_drop(Some(&handle("a")), Some(&DropTarget::DesignerDropArea), elements),
        None
    );
}

#[test]
fn missing_or_unknown_tags_resolve_to_none() {
    let designer = store(&["a", "b"]);
    let elements = designer.elements();
    let source = palette(ElementType::TextField);

    assert_eq!(resolve_drop(None, Some(&DropTarget::DesignerDropArea), elements), None);
    assert_eq!(resolve_drop(Some(&source), None, elements), None);
    assert_eq!(resolve_drop(Some(&source), Some(&DropTarget::top("ghost")), elements), None);
    assert_eq!(resolve_drop(Some(&handle("ghost")), Some(&DropTarget::top("a")), elements), None);
}

// ============================================================================
// Applied through the engine
// ============================================================================

#[test]
fn element_onto_bottom_of_last_moves_to_end() {
    let mut designer = store(&["A", "B", "C"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    drop_onto(&mut engine, &mut designer, &mut id_source, handle("A"), DropTarget::bottom("C"));
    assert_eq!(ids(designer.elements()), vec!["B", "C", "A"]);
}

#[test]
fn element_onto_top_of_first_moves_to_front() {
    let mut designer = store(&["A", "B", "C"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    drop_onto(&mut engine, &mut designer, &mut id_source, handle("C"), DropTarget::top("A"));
    assert_eq!(ids(designer.elements()), vec!["C", "A", "B"]);
}

#[test]
fn element_onto_top_of_later_element_lands_at_its_index() {
    let mut designer = store(&["A", "B", "C"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    drop_onto(&mut engine, &mut designer, &mut id_source, handle("A"), DropTarget::top("C"));
    assert_eq!(ids(designer.elements()), vec!["B", "C", "A"]);

    let mut designer = store(&["A", "B", "C"]);
    drop_onto(&mut engine, &mut designer, &mut id_source, handle("A"), DropTarget::top("B"));
    assert_eq!(ids(designer.elements()), vec!["B", "A", "C"]);
}

#[test]
fn element_onto_bottom_of_earlier_element_lands_after_it() {
    let mut designer = store(&["A", "B", "C", "D"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    drop_onto(&mut engine, &mut designer, &mut id_source, handle("D"), DropTarget::bottom("A"));
    assert_eq!(ids(designer.elements()), vec!["A", "D", "B", "C"]);
}

#[test]
fn palette_onto_top_half_inserts_defaults_before_target() {
    let mut designer = store(&["A", "B"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::new("X");

    drop_onto(
        &mut engine,
        &mut designer,
        &mut id_source,
        palette(ElementType::NumberField),
        DropTarget::top("B"),
    );

    assert_eq!(ids(designer.elements()), vec!["A", "X1", "B"]);
    assert_eq!(designer.get("X1"), Some(&construct(ElementType::NumberField, "X1")));
}

#[test]
fn cancel_leaves_list_unchanged() {
    let mut designer = store(&["A", "B"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    engine
        .handle(DragEvent::Start { active: handle("A") }, &mut designer, &mut id_source)
        .unwrap();
    engine
        .handle(
            DragEvent::Over {
                over: Some(DropTarget::bottom("B")),
            },
            &mut designer,
            &mut id_source,
        )
        .unwrap();
    engine
        .handle(DragEvent::Cancel, &mut designer, &mut id_source)
        .unwrap();

    assert_eq!(engine.state(), &DragState::Idle);
    assert_eq!(ids(designer.elements()), vec!["A", "B"]);
}

#[test]
fn drop_without_start_is_ignored() {
    let mut designer = store(&["A"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    let applied = engine
        .drag_end(Some(DropTarget::DesignerDropArea), &mut designer, &mut id_source)
        .unwrap();
    assert!(applied.is_none());
    assert_eq!(ids(designer.elements()), vec!["A"]);
}

#[test]
fn drop_with_no_target_returns_to_idle() {
    let mut designer = store(&["A"]);
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::default();

    engine.drag_start(palette(ElementType::TitleField));
    assert!(matches!(engine.state(), DragState::Dragging { .. }));

    let applied = engine.drag_end(None, &mut designer, &mut id_source).unwrap();
    assert!(applied.is_none());
    assert_eq!(engine.state(), &DragState::Idle);
    assert_eq!(designer.len(), 1);
}

#[test]
fn applied_drop_reports_new_element_id() {
    let mut designer = DesignerState::new();
    let mut engine = DragEngine::new();
    let mut id_source = SequentialIds::new("n");

    engine.drag_start(palette(ElementType::SelectField));
    let applied = engine
        .drag_end(Some(DropTarget::DesignerDropArea), &mut designer, &mut id_source)
        .unwrap()
        .unwrap();

    assert_eq!(applied.element_id, "n1");
    assert_eq!(
        applied.operation,
        DropOperation::AppendNew {
            element_type: ElementType::SelectField
        }
    );
    assert_eq!(designer.get("n1").unwrap().element_type(), ElementType::SelectField);
}

// ============================================================================
// Overlay and canvas rendering
// ============================================================================

#[test]
fn overlay_follows_active_source() {
    let designer = store(&["A"]);
    let mut engine = DragEngine::new();
    assert_eq!(engine.overlay(designer.elements()), DragOverlay::Hidden);

    engine.drag_start(palette(ElementType::SpacerField));
    assert_eq!(
        engine.overlay(designer.elements()),
        DragOverlay::PaletteButton(ElementType::SpacerField)
    );

    engine.drag_start(handle("A"));
    assert_eq!(
        engine.overlay(designer.elements()),
        DragOverlay::Element(designer.get("A").unwrap())
    );

    engine.drag_start(handle("gone"));
    let overlay = engine.overlay(designer.elements());
    assert_eq!(overlay, DragOverlay::NotFound);
    assert!(overlay.render_html().contains("Element not found!"));
}

#[test]
fn empty_canvas_shows_drop_here_until_hovered() {
    let designer = DesignerState::new();
    let mut engine = DragEngine::new();
    assert!(render_canvas(&designer, &engine).contains("Drop here"));

    engine.drag_start(palette(ElementType::TextField));
    engine.drag_over(Some(DropTarget::DesignerDropArea));
    let html = render_canvas(&designer, &engine);
    assert!(!html.contains("Drop here"));
    assert!(html.contains("drop-placeholder"));
}

#[test]
fn dragged_element_is_hidden_and_hovered_half_is_marked() {
    let designer = store(&["A", "B"]);
    let mut engine = DragEngine::new();
    engine.drag_start(handle("A"));
    engine.drag_over(Some(DropTarget::bottom("B")));

    let html = render_canvas(&designer, &engine);
    assert!(!html.contains("data-id=\"A\""));
    assert!(html.contains("data-id=\"B\""));
    assert_eq!(html.matches("drop-indicator").count(), 1);
}

#[test]
fn sidebar_switches_between_palette_and_properties() {
    let mut designer = store(&["A"]);
    assert!(render_sidebar(&designer, None).contains("Drag and drop elements"));

    designer.set_selected_element(Some("A"));
    let html = render_sidebar(&designer, None);
    assert!(html.contains("Element properties"));
    assert!(html.contains("data-element-id=\"A\""));

    let page = render_designer_page(&designer, &DragEngine::new(), None);
    assert!(page.contains("class=\"designer\""));
}
