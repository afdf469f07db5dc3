use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{designer::drag::DropOperation, element::element_model::ElementType};

/// One line of the designer activity log.
#[derive(Debug, Serialize)]
pub struct ActivityEvent {
    pub timestamp: DateTime<Utc>,
    pub form_id: u64,
    pub step: u64,

    pub action: String,

    pub element_id: Option<String>,
    pub element_type: Option<ElementType>,

    pub detail: Option<String>,
}

impl ActivityEvent {
    pub fn now(form_id: u64, step: u64, action: impl ToString) -> Self {
        Self {
            timestamp: Utc::now(),
            form_id,
            step,
            action: action.to_string(),
            element_id: None,
            element_type: None,
            detail: None,
        }
    }

    pub fn with_element(mut self, id: &str, element_type: ElementType) -> Self {
        self.element_id = Some(id.to_string());
        self.element_type = Some(element_type);
        self
    }

    pub fn with_drop(mut self, operation: &DropOperation) -> Self {
        self.detail = Some(format!("{:?}", operation));
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
