use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::{
    element::{
        element_model::{FormElementInstance, parse_elements},
        html::{FieldState, escape_html},
        registry::{render_form_control, validate},
    },
    error::{SubmitError, SubmitRejected},
};

/// Values and error flags of one person filling in a form.
///
/// Only input elements carry values; structural ones are rendered but never
/// validated or submitted.
#[derive(Debug, Clone, Default)]
pub struct FillSession {
    elements: Vec<FormElementInstance>,
    values: BTreeMap<String, String>,
    invalid: BTreeSet<String>,
}

impl FillSession {
    pub fn new(elements: Vec<FormElementInstance>) -> Self {
        Self {
            elements,
            values: BTreeMap::new(),
            invalid: BTreeSet::new(),
        }
    }

    pub fn from_content(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(parse_elements(content)?))
    }

    pub fn elements(&self) -> &[FormElementInstance] {
        &self.elements
    }

    fn input(&self, id: &str) -> Option<&FormElementInstance> {
        self.elements
            .iter()
            .find(|e| e.id() == id && !e.element_type().is_structural())
    }

    fn inputs(&self) -> impl Iterator<Item = &FormElementInstance> {
        self.elements
            .iter()
            .filter(|e| !e.element_type().is_structural())
    }

    /// Record a changed value and re-validate that field. Returns whether the
    /// value is acceptable.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<bool, SubmitError> {
        let element = self
            .input(id)
            .ok_or_else(|| SubmitError::UnknownField(id.to_string()))?;
        let valid = validate(element, value);

        self.values.insert(id.to_string(), value.to_string());
        if valid {
            self.invalid.remove(id);
        } else {
            self.invalid.insert(id.to_string());
        }
        Ok(valid)
    }

    /// Current value of a field; empty when never touched.
    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn is_invalid(&self, id: &str) -> bool {
        self.invalid.contains(id)
    }

    /// Re-check every input element and refresh all error flags. Returns the
    /// ids that failed, in form order.
    pub fn validate_all(&mut self) -> Vec<String> {
        let failed: Vec<String> = self
            .inputs()
            .filter(|e| !validate(e, self.value(e.id())))
            .map(|e| e.id().to_string())
            .collect();

        self.invalid = failed.iter().cloned().collect();
        failed
    }

    /// Validate everything and produce the submission payload, or reject with
    /// the failing ids. Entered values survive a rejection.
    pub fn submit(&mut self) -> Result<BTreeMap<String, String>, SubmitRejected> {
        let invalid = self.validate_all();
        if !invalid.is_empty() {
            debug!(?invalid, "submission rejected by validation");
            return Err(SubmitRejected { invalid });
        }

        Ok(self
            .inputs()
            .map(|e| (e.id().to_string(), self.value(e.id()).to_string()))
            .collect())
    }

    /// Fillable form. Without `submit_action` this is the designer preview:
    /// same controls, no submit button.
    pub fn render_html(&self, submit_action: Option<&str>) -> String {
        let mut out = match submit_action {
            Some(action) => format!(
                "<form class=\"form-fill\" method=\"post\" action=\"{}\">\n",
                escape_html(action)
            ),
            None => String::from("<form class=\"form-fill preview\">\n"),
        };

        for element in &self.elements {
            let state = FieldState::new(self.value(element.id()), self.is_invalid(element.id()));
            out.push_str(&render_form_control(element, &state));
            out.push('\n');
        }

        if submit_action.is_some() {
            out.push_str("<button type=\"submit\">Submit</button>\n");
        }
        out.push_str("</form>\n");
        out
    }
}
