use std::fmt;

use tracing::debug;

use crate::{
    element::element_model::FormElementInstance,
    error::DesignerError,
};

/// Notification sent to subscribers after every applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignerChange {
    Reset { count: usize },
    Added { id: String, index: usize },
    Removed { id: String, index: usize },
    Moved { id: String, from: usize, to: usize },
    Updated { id: String },
    Selected { id: Option<String> },
}

type Listener = Box<dyn FnMut(&DesignerChange)>;

/// Single owner of the element list and the selection.
///
/// Ids are unique and an element's type never changes after insertion. The
/// selection always names an element currently in the list, or nothing.
#[derive(Default)]
pub struct DesignerState {
    elements: Vec<FormElementInstance>,
    selected: Option<String>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignerState")
            .field("elements", &self.elements)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DesignerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store around an existing list, e.g. freshly loaded content.
    pub fn with_elements(elements: Vec<FormElementInstance>) -> Result<Self, DesignerError> {
        let mut state = Self::new();
        state.set_elements(elements)?;
        Ok(state)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn elements(&self) -> &[FormElementInstance] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FormElementInstance> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&FormElementInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Register a callback run after each applied mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&DesignerChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replace the whole list. Rejects duplicate ids; drops a selection whose
    /// element is gone.
    pub fn set_elements(&mut self, elements: Vec<FormElementInstance>) -> Result<(), DesignerError> {
        for (i, e) in elements.iter().enumerate() {
            if elements[..i].iter().any(|prev| prev.id() == e.id()) {
                return Err(DesignerError::DuplicateId(e.id().to_string()));
            }
        }

        self.elements = elements;
        debug!(count = self.elements.len(), "designer elements replaced");

        let stale = self
            .selected
            .as_deref()
            .is_some_and(|id| self.index_of(id).is_none());
        if stale {
            self.selected = None;
        }

        self.notify(DesignerChange::Reset {
            count: self.elements.len(),
        });
        Ok(())
    }

    /// Insert at `index`; `index == len` appends.
    pub fn add_element(&mut self, index: usize, element: FormElementInstance) -> Result<(), DesignerError> {
        if index > self.elements.len() {
            return Err(DesignerError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        if self.index_of(element.id()).is_some() {
            return Err(DesignerError::DuplicateId(element.id().to_string()));
        }

        let id = element.id().to_string();
        debug!(%id, element_type = %element.element_type(), index, "designer element added");
        self.elements.insert(index, element);
        self.notify(DesignerChange::Added { id, index });
        Ok(())
    }

    /// Remove by id. Absent ids are a no-op, so repeating the call is harmless.
    /// Clears the selection when the selected element goes away.
    pub fn remove_element(&mut self, id: &str) -> Option<FormElementInstance> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        debug!(%id, index, "designer element removed");

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            self.notify(DesignerChange::Selected { id: None });
        }

        self.notify(DesignerChange::Removed {
            id: id.to_string(),
            index,
        });
        Some(removed)
    }

    /// Move an existing element so it ends up at index `to` of the resulting
    /// list. Selection is kept. Returns false when nothing changed.
    pub fn move_element(&mut self, id: &str, to: usize) -> Result<bool, DesignerError> {
        let Some(from) = self.index_of(id) else {
            return Ok(false);
        };
        if to >= self.elements.len() {
            return Err(DesignerError::IndexOutOfRange {
                index: to,
                len: self.elements.len(),
            });
        }
        if from == to {
            return Ok(false);
        }

        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        debug!(%id, from, to, "designer element moved");
        self.notify(DesignerChange::Moved {
            id: id.to_string(),
            from,
            to,
        });
        Ok(true)
    }

    /// Replace the element with `id` wholesale. Absent ids are a no-op.
    /// The replacement must keep the same id and type.
    pub fn update_element(&mut self, id: &str, element: FormElementInstance) -> Result<(), DesignerError> {
        let Some(index) = self.index_of(id) else {
            return Ok(());
        };

        if element.id() != id {
            return Err(DesignerError::IdMismatch {
                id: id.to_string(),
                found: element.id().to_string(),
            });
        }

        let current = self.elements[index].element_type();
        if element.element_type() != current {
            return Err(DesignerError::TypeMismatch {
                id: id.to_string(),
                expected: current,
                found: element.element_type(),
            });
        }

        self.elements[index] = element;
        debug!(%id, index, "designer element updated");
        self.notify(DesignerChange::Updated { id: id.to_string() });
        Ok(())
    }

    /// Select an element by id, or clear with `None`. Unknown ids clear.
    pub fn set_selected_element(&mut self, id: Option<&str>) {
        let next = id
            .filter(|id| self.index_of(id).is_some())
            .map(str::to_string);

        if next == self.selected {
            return;
        }
        debug!(selected = ?next, "designer selection changed");
        self.selected = next.clone();
        self.notify(DesignerChange::Selected { id: next });
    }

    fn notify(&mut self, change: DesignerChange) {
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}
