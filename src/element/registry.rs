use crate::{
    element::{
        element_model::{ElementType, FormElementInstance},
        html::{FieldState, escape_html},
        properties::{PropertyField, PropertyValues},
    },
    error::PropertyErrors,
    fields::{
        checkbox_field::CHECKBOX_FIELD,
        date_field::DATE_FIELD,
        layout_fields::{PARAGRAPH_FIELD, SEPARATOR_FIELD, SPACER_FIELD, SUBTITLE_FIELD, TITLE_FIELD},
        number_field::NUMBER_FIELD,
        select_field::SELECT_FIELD,
        text_field::{TEXT_FIELD, TEXTAREA_FIELD},
    },
};

// ============================================================================
// Behavior bundle per element type
// ============================================================================

pub type ConstructFn = fn(&str) -> FormElementInstance;
pub type ValidateFn = fn(&FormElementInstance, &str) -> bool;
pub type DesignerRenderFn = fn(&FormElementInstance) -> String;
pub type FormRenderFn = fn(&FormElementInstance, &FieldState<'_>) -> String;
pub type PropertiesFn = fn(&FormElementInstance) -> Vec<PropertyField>;
pub type ApplyPropertiesFn =
    fn(&FormElementInstance, &PropertyValues) -> Result<FormElementInstance, PropertyErrors>;

/// Palette button for an element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteButton {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Everything the designer, the properties panel, and the fillable form
/// need to know about one element type.
pub struct FormElement {
    pub element_type: ElementType,
    pub palette: PaletteButton,

    /// New instance with default attributes
    pub construct: ConstructFn,

    /// Whether a submitted value is acceptable
    pub validate: ValidateFn,

    /// Read-only preview on the designer canvas
    pub designer_component: DesignerRenderFn,

    /// Live control in the fillable form
    pub form_component: FormRenderFn,

    /// Editable properties, pre-filled with current values
    pub properties_component: PropertiesFn,

    /// Validate properties and build the replacement instance
    pub apply_properties: ApplyPropertiesFn,
}

/// Registry lookup. Total over the closed set of element types.
pub fn form_element(element_type: ElementType) -> &'static FormElement {
    match element_type {
        ElementType::TitleField => &TITLE_FIELD,
        ElementType::SubtitleField => &SUBTITLE_FIELD,
        ElementType::ParagraphField => &PARAGRAPH_FIELD,
        ElementType::SeparatorField => &SEPARATOR_FIELD,
        ElementType::SpacerField => &SPACER_FIELD,
        ElementType::TextField => &TEXT_FIELD,
        ElementType::TextAreaField => &TEXTAREA_FIELD,
        ElementType::NumberField => &NUMBER_FIELD,
        ElementType::DateField => &DATE_FIELD,
        ElementType::SelectField => &SELECT_FIELD,
        ElementType::CheckBoxField => &CHECKBOX_FIELD,
    }
}

pub fn construct(element_type: ElementType, id: &str) -> FormElementInstance {
    (form_element(element_type).construct)(id)
}

/// Validation dispatch: delegate to the instance's own type rule.
pub fn validate(instance: &FormElementInstance, value: &str) -> bool {
    (form_element(instance.element_type()).validate)(instance, value)
}

pub fn render_designer(instance: &FormElementInstance) -> String {
    (form_element(instance.element_type()).designer_component)(instance)
}

pub fn render_form_control(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    (form_element(instance.element_type()).form_component)(instance, state)
}

// ============================================================================
// Palette
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PaletteGroup {
    pub title: &'static str,
    pub elements: &'static [ElementType],
}

pub const PALETTE: [PaletteGroup; 2] = [
    PaletteGroup {
        title: "Layout Elements",
        elements: &[
            ElementType::TitleField,
            ElementType::SubtitleField,
            ElementType::ParagraphField,
            ElementType::SeparatorField,
            ElementType::SpacerField,
        ],
    },
    PaletteGroup {
        title: "Form Elements",
        elements: &[
            ElementType::TextField,
            ElementType::NumberField,
            ElementType::TextAreaField,
            ElementType::DateField,
            ElementType::SelectField,
            ElementType::CheckBoxField,
        ],
    },
];

/// One palette button, as shown in the sidebar and in the drag overlay.
pub fn render_palette_button(element_type: ElementType) -> String {
    let palette = form_element(element_type).palette;
    format!(
        "<button class=\"palette-button\" data-type=\"{}\"><i class=\"icon icon-{}\"></i><p>{}</p></button>",
        element_type,
        escape_html(palette.icon),
        escape_html(palette.label)
    )
}

/// The palette sidebar, grouped into layout and form elements.
pub fn render_palette() -> String {
    let mut out = String::from("<div class=\"palette\">\n<p>Drag and drop elements</p>\n");
    for group in &PALETTE {
        out.push_str(&format!("<p class=\"group\">{}</p>\n", escape_html(group.title)));
        for element_type in group.elements {
            out.push_str(&render_palette_button(*element_type));
            out.push('\n');
        }
    }
    out.push_str("</div>\n");
    out
}
