use tracing::debug;

use crate::{
    designer::{designer_state::DesignerState, ids::IdSource},
    element::{
        element_model::{ElementType, FormElementInstance},
        registry::{construct, render_designer, render_palette_button},
    },
    error::DesignerError,
};

// ============================================================================
// Drag sources, drop targets, gesture events
// ============================================================================

/// What is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A sidebar palette button; dropping it creates a new element
    PaletteButton { element_type: ElementType },

    /// The handle of an element already on the canvas
    DesignerElement {
        element_id: String,
        element_type: ElementType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Top,
    Bottom,
}

/// Where the pointer currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// The canvas itself, outside any element
    DesignerDropArea,

    /// The top or bottom half of a placed element
    ElementHalf { element_id: String, half: Half },
}

impl DropTarget {
    pub fn top(element_id: &str) -> Self {
        DropTarget::ElementHalf {
            element_id: element_id.to_string(),
            half: Half::Top,
        }
    }

    pub fn bottom(element_id: &str) -> Self {
        DropTarget::ElementHalf {
            element_id: element_id.to_string(),
            half: Half::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start { active: DragSource },
    Over { over: Option<DropTarget> },
    End { over: Option<DropTarget> },
    Cancel,
}

// ============================================================================
// Drop decision (pure)
// ============================================================================

/// Mutation a completed drop maps to. Indices refer to the list at drop time,
/// except `Move::to`, which indexes the list with the source removed.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOperation {
    AppendNew { element_type: ElementType },
    InsertNew { element_type: ElementType, index: usize },
    Move { element_id: String, from: usize, to: usize },
}

impl DropOperation {
    /// A move that puts the element back where it was.
    pub fn is_noop(&self) -> bool {
        matches!(self, DropOperation::Move { from, to, .. } if from == to)
    }
}

/// Decide what a drop does, without touching any state.
///
/// Returns `None` for every combination that must leave the list unchanged:
/// missing source or target, ids not in the list, an element dropped onto
/// itself, or an element dropped on the bare canvas. A move onto a neighbour's
/// near half still resolves, as a move with `from == to`.
pub fn resolve_drop(
    active: Option<&DragSource>,
    over: Option<&DropTarget>,
    elements: &[FormElementInstance],
) -> Option<DropOperation> {
    let (active, over) = (active?, over?);
    let position = |id: &str| elements.iter().position(|e| e.id() == id);

    match (active, over) {
        (DragSource::PaletteButton { element_type }, DropTarget::DesignerDropArea) => {
            Some(DropOperation::AppendNew {
                element_type: *element_type,
            })
        }

        (DragSource::PaletteButton { element_type }, DropTarget::ElementHalf { element_id, half }) => {
            let over_index = position(element_id)?;
            let index = match half {
                Half::Top => over_index,
                Half::Bottom => over_index + 1,
            };
            Some(DropOperation::InsertNew {
                element_type: *element_type,
                index,
            })
        }

        (
            DragSource::DesignerElement { element_id, .. },
            DropTarget::ElementHalf {
                element_id: over_id,
                half,
            },
        ) => {
            if element_id == over_id {
                return None;
            }
            let from = position(element_id)?;
            let over_index = position(over_id)?;

            // Target index taken before removal, clamped to the shortened list
            let slot = match half {
                Half::Top => over_index,
                Half::Bottom => over_index + 1,
            };
            let to = slot.min(elements.len() - 1);
            Some(DropOperation::Move {
                element_id: element_id.clone(),
                from,
                to,
            })
        }

        (DragSource::DesignerElement { .. }, DropTarget::DesignerDropArea) => None,
    }
}

/// Outcome of an applied drop: the operation and the element it touched.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDrop {
    pub operation: DropOperation,
    pub element_id: String,
}

/// Apply a resolved drop through the store.
pub fn apply_drop(
    operation: DropOperation,
    designer: &mut DesignerState,
    ids: &mut dyn IdSource,
) -> Result<AppliedDrop, DesignerError> {
    let element_id = match &operation {
        DropOperation::AppendNew { element_type } => {
            let element = construct(*element_type, &ids.next_id());
            let id = element.id().to_string();
            designer.add_element(designer.len(), element)?;
            id
        }
        DropOperation::InsertNew { element_type, index } => {
            let element = construct(*element_type, &ids.next_id());
            let id = element.id().to_string();
            designer.add_element(*index, element)?;
            id
        }
        DropOperation::Move { element_id, to, .. } => {
            designer.move_element(element_id, *to)?;
            element_id.clone()
        }
    };
    Ok(AppliedDrop {
        operation,
        element_id,
    })
}

// ============================================================================
// Gesture state machine
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: DragSource,
        over: Option<DropTarget>,
    },
}

/// Tracks one drag gesture at a time: `Idle -> Dragging -> Idle`.
#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn active(&self) -> Option<&DragSource> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    pub fn hovered(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Whether the canvas element with `id` is the one being dragged, in
    /// which case its normal rendering is suppressed.
    pub fn is_dragging_element(&self, id: &str) -> bool {
        matches!(
            self.active(),
            Some(DragSource::DesignerElement { element_id, .. }) if element_id == id
        )
    }

    pub fn handle(
        &mut self,
        event: DragEvent,
        designer: &mut DesignerState,
        ids: &mut dyn IdSource,
    ) -> Result<Option<AppliedDrop>, DesignerError> {
        match event {
            DragEvent::Start { active } => {
                self.drag_start(active);
                Ok(None)
            }
            DragEvent::Over { over } => {
                self.drag_over(over);
                Ok(None)
            }
            DragEvent::End { over } => self.drag_end(over, designer, ids),
            DragEvent::Cancel => {
                self.drag_cancel();
                Ok(None)
            }
        }
    }

    pub fn drag_start(&mut self, active: DragSource) {
        debug!(?active, "drag started");
        self.state = DragState::Dragging { active, over: None };
    }

    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        match &mut self.state {
            DragState::Dragging { over, .. } => *over = target,
            DragState::Idle => debug!(?target, "drag-over without an active drag, ignored"),
        }
    }

    /// Finish the gesture. Always returns to `Idle`; mutates the store only
    /// when the drop resolves to an operation.
    pub fn drag_end(
        &mut self,
        over: Option<DropTarget>,
        designer: &mut DesignerState,
        ids: &mut dyn IdSource,
    ) -> Result<Option<AppliedDrop>, DesignerError> {
        let state = std::mem::take(&mut self.state);
        let active = match state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        };

        let Some(operation) = resolve_drop(active.as_ref(), over.as_ref(), designer.elements()) else {
            debug!(?active, ?over, "drop ignored");
            return Ok(None);
        };

        debug!(?operation, "drop resolved");
        apply_drop(operation, designer, ids).map(Some)
    }

    pub fn drag_cancel(&mut self) {
        if self.state != DragState::Idle {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// What follows the pointer while dragging.
    pub fn overlay<'a>(&self, elements: &'a [FormElementInstance]) -> DragOverlay<'a> {
        match self.active() {
            None => DragOverlay::Hidden,
            Some(DragSource::PaletteButton { element_type }) => DragOverlay::PaletteButton(*element_type),
            Some(DragSource::DesignerElement { element_id, .. }) => elements
                .iter()
                .find(|e| e.id() == element_id)
                .map(DragOverlay::Element)
                .unwrap_or(DragOverlay::NotFound),
        }
    }
}

// ============================================================================
// Drag overlay
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOverlay<'a> {
    Hidden,
    PaletteButton(ElementType),
    Element(&'a FormElementInstance),
    /// The dragged id is no longer in the list
    NotFound,
}

impl DragOverlay<'_> {
    pub fn render_html(&self) -> String {
        let body = match self {
            DragOverlay::Hidden => return String::new(),
            DragOverlay::PaletteButton(element_type) => render_palette_button(*element_type),
            DragOverlay::Element(element) => render_designer(element),
            DragOverlay::NotFound => "<p>Element not found!</p>".to_string(),
        };
        format!("<div class=\"drag-overlay\">{}</div>", body)
    }
}
