use std::collections::BTreeMap;

use crate::{
    element::{
        element_model::{ElementType, FormElementInstance},
        html::escape_html,
        registry::form_element,
    },
    error::{PropertyError, PropertyErrors},
};

// ============================================================================
// Property bounds shared across field types
// ============================================================================

pub const LABEL_LEN: (usize, usize) = (2, 50);
pub const HELPER_TEXT_LEN: (usize, usize) = (0, 200);
pub const PLACEHOLDER_LEN: (usize, usize) = (0, 50);
pub const HEADING_LEN: (usize, usize) = (2, 50);
pub const PARAGRAPH_LEN: (usize, usize) = (2, 500);
pub const SPACER_HEIGHT: (u32, u32) = (5, 200);
pub const TEXTAREA_ROWS: (u32, u32) = (1, 10);

// ============================================================================
// Properties form model
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Single-line text, length in characters
    Text { min: usize, max: usize },
    /// Multi-line text, length in characters
    LongText { min: usize, max: usize },
    /// Whole number, inclusive range
    Number { min: u32, max: u32 },
    Toggle,
    OptionList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(u32),
    Bool(bool),
    List(Vec<String>),
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(list: Vec<String>) -> Self {
        PropertyValue::List(list)
    }
}

/// One editable property as shown in the properties panel, pre-filled with
/// the element's current value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: PropertyKind,
    pub value: PropertyValue,
}

/// Values submitted from a properties form, keyed by property name.
///
/// Properties left out keep the element's current value, so applying a
/// partial set still produces a complete attribute replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValues {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Parse raw `name=value` strings against the element's properties form.
    ///
    /// Toggles take `true`/`false`; option lists are comma separated.
    pub fn parse(
        instance: &FormElementInstance,
        pairs: &[(String, String)],
    ) -> Result<Self, PropertyErrors> {
        let schema = properties_of(instance);
        let mut values = PropertyValues::new();
        let mut errors = Vec::new();

        for (name, raw) in pairs {
            let Some(field) = schema.iter().find(|f| f.name == name.as_str()) else {
                errors.push(PropertyError::UnknownProperty {
                    property: name.clone(),
                    element_type: instance.element_type(),
                });
                continue;
            };

            let parsed = match field.kind {
                PropertyKind::Text { .. } | PropertyKind::LongText { .. } => {
                    Some(PropertyValue::Text(raw.clone()))
                }
                PropertyKind::Number { .. } => raw.trim().parse().ok().map(PropertyValue::Number),
                PropertyKind::Toggle => raw.trim().parse().ok().map(PropertyValue::Bool),
                PropertyKind::OptionList => Some(PropertyValue::List(
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect(),
                )),
            };

            match parsed {
                Some(value) => values.insert(name, value),
                None => errors.push(PropertyError::InvalidValue {
                    property: name.clone(),
                    value: raw.clone(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(PropertyErrors(errors))
        }
    }
}

/// Properties form of an element, dispatched through the registry.
pub fn properties_of(instance: &FormElementInstance) -> Vec<PropertyField> {
    (form_element(instance.element_type()).properties_component)(instance)
}

/// Validate submitted values and build the full replacement instance.
pub fn apply_properties(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    (form_element(instance.element_type()).apply_properties)(instance, values)
}

// ============================================================================
// Reading submitted values with bounds checks
// ============================================================================

/// Pulls typed values out of `PropertyValues`, falling back to the current
/// attribute and collecting every violation instead of stopping at the first.
pub struct PropertyReader<'a> {
    element_type: ElementType,
    values: &'a PropertyValues,
    errors: Vec<PropertyError>,
}

impl<'a> PropertyReader<'a> {
    pub fn new(element_type: ElementType, values: &'a PropertyValues) -> Self {
        Self {
            element_type,
            values,
            errors: Vec::new(),
        }
    }

    pub fn text(&mut self, name: &str, current: &str, bounds: (usize, usize)) -> String {
        let values = self.values;
        let value = match values.get(name) {
            None => current.to_string(),
            Some(PropertyValue::Text(s)) => s.clone(),
            Some(other) => {
                self.invalid(name, other);
                return current.to_string();
            }
        };

        let len = value.chars().count();
        if len < bounds.0 {
            self.errors.push(PropertyError::TooShort {
                property: name.to_string(),
                min: bounds.0,
            });
        } else if len > bounds.1 {
            self.errors.push(PropertyError::TooLong {
                property: name.to_string(),
                max: bounds.1,
            });
        }
        value
    }

    pub fn number(&mut self, name: &str, current: u32, bounds: (u32, u32)) -> u32 {
        let values = self.values;
        let value = match values.get(name) {
            None => current,
            Some(PropertyValue::Number(n)) => *n,
            Some(other) => {
                self.invalid(name, other);
                return current;
            }
        };

        if value < bounds.0 || value > bounds.1 {
            self.errors.push(PropertyError::OutOfRange {
                property: name.to_string(),
                min: bounds.0,
                max: bounds.1,
            });
        }
        value
    }

    pub fn toggle(&mut self, name: &str, current: bool) -> bool {
        let values = self.values;
        match values.get(name) {
            None => current,
            Some(PropertyValue::Bool(b)) => *b,
            Some(other) => {
                self.invalid(name, other);
                current
            }
        }
    }

    pub fn list(&mut self, name: &str, current: &[String]) -> Vec<String> {
        let values = self.values;
        match values.get(name) {
            None => current.to_vec(),
            Some(PropertyValue::List(items)) => items.clone(),
            Some(other) => {
                self.invalid(name, other);
                current.to_vec()
            }
        }
    }

    /// Report collected violations, plus any submitted name the form does not know.
    pub fn finish(mut self, known: &[&str]) -> Result<(), PropertyErrors> {
        for name in self.values.names() {
            if !known.contains(&name) {
                self.errors.push(PropertyError::UnknownProperty {
                    property: name.to_string(),
                    element_type: self.element_type,
                });
            }
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(PropertyErrors(self.errors))
        }
    }

    fn invalid(&mut self, name: &str, value: &PropertyValue) {
        self.errors.push(PropertyError::InvalidValue {
            property: name.to_string(),
            value: format!("{:?}", value),
        });
    }
}

// ============================================================================
// Properties panel rendering
// ============================================================================

/// Render the properties panel of an element as an HTML form.
pub fn render_properties_html(instance: &FormElementInstance, errors: Option<&PropertyErrors>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<form class=\"properties\" data-element-id=\"{}\">\n",
        escape_html(instance.id())
    ));

    let fields = properties_of(instance);
    if fields.is_empty() {
        out.push_str("<p class=\"muted\">No properties for this element</p>\n");
    }

    for field in &fields {
        let name = escape_html(field.name);
        let control = match (&field.kind, &field.value) {
            (PropertyKind::Text { max, .. }, PropertyValue::Text(v)) => format!(
                "<input type=\"text\" name=\"{}\" value=\"{}\" maxlength=\"{}\">",
                name,
                escape_html(v),
                max
            ),
            (PropertyKind::LongText { max, .. }, PropertyValue::Text(v)) => format!(
                "<textarea name=\"{}\" maxlength=\"{}\">{}</textarea>",
                name,
                max,
                escape_html(v)
            ),
            (PropertyKind::Number { min, max }, PropertyValue::Number(n)) => format!(
                "<input type=\"range\" name=\"{}\" min=\"{}\" max=\"{}\" value=\"{}\">",
                name, min, max, n
            ),
            (PropertyKind::Toggle, PropertyValue::Bool(b)) => format!(
                "<input type=\"checkbox\" role=\"switch\" name=\"{}\"{}>",
                name,
                if *b { " checked" } else { "" }
            ),
            (PropertyKind::OptionList, PropertyValue::List(items)) => {
                let rows: String = items
                    .iter()
                    .map(|o| format!("<li><input type=\"text\" name=\"{}[]\" value=\"{}\"></li>", name, escape_html(o)))
                    .collect();
                format!("<ul class=\"options\">{}</ul><button type=\"button\">Add</button>", rows)
            }
            _ => String::new(),
        };

        let messages: String = errors
            .map(|e| e.for_property(field.name))
            .unwrap_or_default()
            .iter()
            .map(|e| format!("<p class=\"error\">{}</p>", escape_html(&e.to_string())))
            .collect();

        out.push_str(&format!(
            "<div class=\"property\"><label>{}</label>{}<p class=\"description\">{}</p>{}</div>\n",
            escape_html(field.label),
            control,
            escape_html(field.description),
            messages
        ));
    }

    if !fields.is_empty() {
        out.push_str("<button type=\"submit\">Save</button>\n");
    }
    out.push_str("</form>\n");
    out
}
