use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// Element type tags
// ============================================================================

/// Closed set of element types a form can contain.
///
/// The serialized names are the tags stored in persisted form content, so
/// they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    TitleField,
    SubtitleField,
    ParagraphField,
    SeparatorField,
    SpacerField,
    TextField,
    TextAreaField,
    NumberField,
    DateField,
    SelectField,
    CheckBoxField,
}

impl ElementType {
    pub const ALL: [ElementType; 11] = [
        ElementType::TitleField,
        ElementType::SubtitleField,
        ElementType::ParagraphField,
        ElementType::SeparatorField,
        ElementType::SpacerField,
        ElementType::TextField,
        ElementType::TextAreaField,
        ElementType::NumberField,
        ElementType::DateField,
        ElementType::SelectField,
        ElementType::CheckBoxField,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::TitleField => "TitleField",
            ElementType::SubtitleField => "SubtitleField",
            ElementType::ParagraphField => "ParagraphField",
            ElementType::SeparatorField => "SeparatorField",
            ElementType::SpacerField => "SpacerField",
            ElementType::TextField => "TextField",
            ElementType::TextAreaField => "TextAreaField",
            ElementType::NumberField => "NumberField",
            ElementType::DateField => "DateField",
            ElementType::SelectField => "SelectField",
            ElementType::CheckBoxField => "CheckBoxField",
        }
    }

    /// Layout-only elements carry no submittable value.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ElementType::TitleField
                | ElementType::SubtitleField
                | ElementType::ParagraphField
                | ElementType::SeparatorField
                | ElementType::SpacerField
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    /// Accepts the persisted tag (`TextField`) or a short alias (`text`,
    /// `short-text`, `checkbox`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = ElementType::ALL.iter().find(|t| t.as_str() == s) {
            return Ok(*t);
        }

        let alias = s.trim().to_lowercase().replace(['_', ' '], "-");
        let t = match alias.as_str() {
            "title" | "heading" => ElementType::TitleField,
            "subtitle" | "subheading" => ElementType::SubtitleField,
            "paragraph" => ElementType::ParagraphField,
            "separator" | "divider" => ElementType::SeparatorField,
            "spacer" | "blank-space" => ElementType::SpacerField,
            "text" | "short-text" => ElementType::TextField,
            "textarea" | "text-area" | "long-text" => ElementType::TextAreaField,
            "number" => ElementType::NumberField,
            "date" => ElementType::DateField,
            "select" | "single-select" => ElementType::SelectField,
            "checkbox" | "check-box" => ElementType::CheckBoxField,
            _ => return Err(format!("unknown element type '{}'", s)),
        };
        Ok(t)
    }
}

// ============================================================================
// Per-type attribute payloads (`extraAttributes`)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAttributes {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleAttributes {
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphAttributes {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerAttributes {
    /// Height in pixels
    pub height: u32,
}

/// Single-line inputs (text and number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub place_holder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAreaAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub place_holder: String,
    #[serde(default = "default_rows")]
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    pub place_holder: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Inputs without a placeholder (date and checkbox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
}

fn default_rows() -> u32 {
    3
}

/// Type-specific configuration of an element.
///
/// The variant decides the element type, so an instance can never carry
/// attributes that disagree with its tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementAttributes {
    Title(TitleAttributes),
    Subtitle(SubtitleAttributes),
    Paragraph(ParagraphAttributes),
    Separator,
    Spacer(SpacerAttributes),
    Text(InputAttributes),
    TextArea(TextAreaAttributes),
    Number(InputAttributes),
    Date(BasicAttributes),
    Select(SelectAttributes),
    CheckBox(BasicAttributes),
}

impl ElementAttributes {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementAttributes::Title(_) => ElementType::TitleField,
            ElementAttributes::Subtitle(_) => ElementType::SubtitleField,
            ElementAttributes::Paragraph(_) => ElementType::ParagraphField,
            ElementAttributes::Separator => ElementType::SeparatorField,
            ElementAttributes::Spacer(_) => ElementType::SpacerField,
            ElementAttributes::Text(_) => ElementType::TextField,
            ElementAttributes::TextArea(_) => ElementType::TextAreaField,
            ElementAttributes::Number(_) => ElementType::NumberField,
            ElementAttributes::Date(_) => ElementType::DateField,
            ElementAttributes::Select(_) => ElementType::SelectField,
            ElementAttributes::CheckBox(_) => ElementType::CheckBoxField,
        }
    }

    /// Label shown for input elements; `None` for structural ones.
    pub fn label(&self) -> Option<&str> {
        match self {
            ElementAttributes::Text(a) | ElementAttributes::Number(a) => Some(&a.label),
            ElementAttributes::TextArea(a) => Some(&a.label),
            ElementAttributes::Select(a) => Some(&a.label),
            ElementAttributes::Date(a) | ElementAttributes::CheckBox(a) => Some(&a.label),
            _ => None,
        }
    }

    pub fn required(&self) -> bool {
        match self {
            ElementAttributes::Text(a) | ElementAttributes::Number(a) => a.required,
            ElementAttributes::TextArea(a) => a.required,
            ElementAttributes::Select(a) => a.required,
            ElementAttributes::Date(a) | ElementAttributes::CheckBox(a) => a.required,
            _ => false,
        }
    }

    fn from_value(element_type: ElementType, value: Option<Value>) -> Result<Self, serde_json::Error> {
        if element_type == ElementType::SeparatorField {
            return Ok(ElementAttributes::Separator);
        }

        let value = value.ok_or_else(|| {
            serde_json::Error::custom(format!("{} requires extraAttributes", element_type))
        })?;

        let attributes = match element_type {
            ElementType::TitleField => ElementAttributes::Title(serde_json::from_value(value)?),
            ElementType::SubtitleField => ElementAttributes::Subtitle(serde_json::from_value(value)?),
            ElementType::ParagraphField => ElementAttributes::Paragraph(serde_json::from_value(value)?),
            ElementType::SeparatorField => ElementAttributes::Separator,
            ElementType::SpacerField => ElementAttributes::Spacer(serde_json::from_value(value)?),
            ElementType::TextField => ElementAttributes::Text(serde_json::from_value(value)?),
            ElementType::TextAreaField => ElementAttributes::TextArea(serde_json::from_value(value)?),
            ElementType::NumberField => ElementAttributes::Number(serde_json::from_value(value)?),
            ElementType::DateField => ElementAttributes::Date(serde_json::from_value(value)?),
            ElementType::SelectField => ElementAttributes::Select(serde_json::from_value(value)?),
            ElementType::CheckBoxField => ElementAttributes::CheckBox(serde_json::from_value(value)?),
        };
        Ok(attributes)
    }
}

// ============================================================================
// Form element instance
// ============================================================================

/// One placed element on a form.
///
/// Persisted as `{ "id", "type", "extraAttributes" }`. `extraAttributes` is
/// omitted for separators, which have no configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct FormElementInstance {
    id: String,
    attributes: ElementAttributes,
}

impl FormElementInstance {
    pub fn new(id: impl Into<String>, attributes: ElementAttributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn element_type(&self) -> ElementType {
        self.attributes.element_type()
    }

    pub fn attributes(&self) -> &ElementAttributes {
        &self.attributes
    }

    /// Same id, new attributes. Used to build the full replacement handed to
    /// `DesignerState::update_element`.
    pub fn with_attributes(&self, attributes: ElementAttributes) -> Self {
        Self {
            id: self.id.clone(),
            attributes,
        }
    }
}

#[derive(Deserialize)]
struct RawElement {
    id: String,
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(rename = "extraAttributes", default)]
    extra_attributes: Option<Value>,
}

impl TryFrom<RawElement> for FormElementInstance {
    type Error = serde_json::Error;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let attributes = ElementAttributes::from_value(raw.element_type, raw.extra_attributes)?;
        Ok(FormElementInstance {
            id: raw.id,
            attributes,
        })
    }
}

impl Serialize for FormElementInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_attributes = !matches!(self.attributes, ElementAttributes::Separator);
        let len = if has_attributes { 3 } else { 2 };

        let mut state = serializer.serialize_struct("FormElementInstance", len)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.element_type())?;

        match &self.attributes {
            ElementAttributes::Title(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Subtitle(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Paragraph(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Separator => {}
            ElementAttributes::Spacer(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Text(a) | ElementAttributes::Number(a) => {
                state.serialize_field("extraAttributes", a)?
            }
            ElementAttributes::TextArea(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Select(a) => state.serialize_field("extraAttributes", a)?,
            ElementAttributes::Date(a) | ElementAttributes::CheckBox(a) => {
                state.serialize_field("extraAttributes", a)?
            }
        }

        state.end()
    }
}

// ============================================================================
// Ordered element list (de)serialization
// ============================================================================

/// Parse persisted form content into an ordered element list.
pub fn parse_elements(content: &str) -> Result<Vec<FormElementInstance>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Serialize an ordered element list into persisted form content.
pub fn elements_to_json(elements: &[FormElementInstance]) -> Result<String, serde_json::Error> {
    serde_json::to_string(elements)
}
