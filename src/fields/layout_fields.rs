use crate::{
    element::{
        element_model::{
            ElementAttributes, ElementType, FormElementInstance, ParagraphAttributes,
            SpacerAttributes, SubtitleAttributes, TitleAttributes,
        },
        html::{FieldState, escape_html, field_container},
        properties::{
            HEADING_LEN, PARAGRAPH_LEN, PropertyField, PropertyKind, PropertyReader,
            PropertyValue, PropertyValues, SPACER_HEIGHT,
        },
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
};

// Structural elements: no submittable value, always valid.

fn always_valid(_: &FormElementInstance, _: &str) -> bool {
    true
}

// ============================================================================
// Title
// ============================================================================

pub static TITLE_FIELD: FormElement = FormElement {
    element_type: ElementType::TitleField,
    palette: PaletteButton {
        label: "Title Field",
        icon: "heading-1",
    },
    construct: construct_title,
    validate: always_valid,
    designer_component: title_designer,
    form_component: title_form,
    properties_component: title_properties,
    apply_properties: title_apply,
};

fn construct_title(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Title(TitleAttributes {
            title: "Title field".to_string(),
        }),
    )
}

fn title_of(instance: &FormElementInstance) -> &str {
    match instance.attributes() {
        ElementAttributes::Title(a) => &a.title,
        _ => "",
    }
}

fn title_designer(instance: &FormElementInstance) -> String {
    field_container(
        "title",
        &format!(
            "<label class=\"muted\">Title field</label><p class=\"text-xl\">{}</p>",
            escape_html(title_of(instance))
        ),
    )
}

fn title_form(instance: &FormElementInstance, _: &FieldState<'_>) -> String {
    format!("<p class=\"text-xl\">{}</p>", escape_html(title_of(instance)))
}

fn title_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    vec![PropertyField {
        name: "title",
        label: "Title",
        description: "Heading text shown on the form",
        kind: PropertyKind::Text {
            min: HEADING_LEN.0,
            max: HEADING_LEN.1,
        },
        value: PropertyValue::Text(title_of(instance).to_string()),
    }]
}

fn title_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let mut reader = PropertyReader::new(ElementType::TitleField, values);
    let title = reader.text("title", title_of(instance), HEADING_LEN);
    reader.finish(&["title"])?;
    Ok(instance.with_attributes(ElementAttributes::Title(TitleAttributes { title })))
}

// ============================================================================
// Subtitle
// ============================================================================

pub static SUBTITLE_FIELD: FormElement = FormElement {
    element_type: ElementType::SubtitleField,
    palette: PaletteButton {
        label: "Subtitle Field",
        icon: "heading-2",
    },
    construct: construct_subtitle,
    validate: always_valid,
    designer_component: subtitle_designer,
    form_component: subtitle_form,
    properties_component: subtitle_properties,
    apply_properties: subtitle_apply,
};

fn construct_subtitle(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Subtitle(SubtitleAttributes {
            subtitle: "Subtitle field".to_string(),
        }),
    )
}

fn subtitle_of(instance: &FormElementInstance) -> &str {
    match instance.attributes() {
        ElementAttributes::Subtitle(a) => &a.subtitle,
        _ => "",
    }
}

fn subtitle_designer(instance: &FormElementInstance) -> String {
    field_container(
        "subtitle",
        &format!(
            "<label class=\"muted\">SubTitle field</label><p class=\"text-lg\">{}</p>",
            escape_html(subtitle_of(instance))
        ),
    )
}

fn subtitle_form(instance: &FormElementInstance, _: &FieldState<'_>) -> String {
    format!("<p class=\"text-lg\">{}</p>", escape_html(subtitle_of(instance)))
}

fn subtitle_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    vec![PropertyField {
        name: "subtitle",
        label: "Subtitle",
        description: "Secondary heading text",
        kind: PropertyKind::Text {
            min: HEADING_LEN.0,
            max: HEADING_LEN.1,
        },
        value: PropertyValue::Text(subtitle_of(instance).to_string()),
    }]
}

fn subtitle_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let mut reader = PropertyReader::new(ElementType::SubtitleField, values);
    let subtitle = reader.text("subtitle", subtitle_of(instance), HEADING_LEN);
    reader.finish(&["subtitle"])?;
    Ok(instance.with_attributes(ElementAttributes::Subtitle(SubtitleAttributes { subtitle })))
}

// ============================================================================
// Paragraph
// ============================================================================

pub static PARAGRAPH_FIELD: FormElement = FormElement {
    element_type: ElementType::ParagraphField,
    palette: PaletteButton {
        label: "Paragraph Field",
        icon: "paragraph",
    },
    construct: construct_paragraph,
    validate: always_valid,
    designer_component: paragraph_designer,
    form_component: paragraph_form,
    properties_component: paragraph_properties,
    apply_properties: paragraph_apply,
};

fn construct_paragraph(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Paragraph(ParagraphAttributes {
            text: "Text here".to_string(),
        }),
    )
}

fn paragraph_of(instance: &FormElementInstance) -> &str {
    match instance.attributes() {
        ElementAttributes::Paragraph(a) => &a.text,
        _ => "",
    }
}

fn paragraph_designer(instance: &FormElementInstance) -> String {
    field_container(
        "paragraph",
        &format!(
            "<label class=\"muted\">Paragraph field</label><p>{}</p>",
            escape_html(paragraph_of(instance))
        ),
    )
}

fn paragraph_form(instance: &FormElementInstance, _: &FieldState<'_>) -> String {
    format!("<p>{}</p>", escape_html(paragraph_of(instance)))
}

fn paragraph_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    vec![PropertyField {
        name: "text",
        label: "Text",
        description: "Paragraph shown between fields",
        kind: PropertyKind::LongText {
            min: PARAGRAPH_LEN.0,
            max: PARAGRAPH_LEN.1,
        },
        value: PropertyValue::Text(paragraph_of(instance).to_string()),
    }]
}

fn paragraph_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let mut reader = PropertyReader::new(ElementType::ParagraphField, values);
    let text = reader.text("text", paragraph_of(instance), PARAGRAPH_LEN);
    reader.finish(&["text"])?;
    Ok(instance.with_attributes(ElementAttributes::Paragraph(ParagraphAttributes { text })))
}

// ============================================================================
// Separator
// ============================================================================

pub static SEPARATOR_FIELD: FormElement = FormElement {
    element_type: ElementType::SeparatorField,
    palette: PaletteButton {
        label: "Separator Field",
        icon: "separator",
    },
    construct: construct_separator,
    validate: always_valid,
    designer_component: separator_designer,
    form_component: separator_form,
    properties_component: separator_properties,
    apply_properties: separator_apply,
};

fn construct_separator(id: &str) -> FormElementInstance {
    FormElementInstance::new(id, ElementAttributes::Separator)
}

fn separator_designer(_: &FormElementInstance) -> String {
    field_container("separator", "<label class=\"muted\">Separator field</label><hr>")
}

fn separator_form(_: &FormElementInstance, _: &FieldState<'_>) -> String {
    "<hr>".to_string()
}

fn separator_properties(_: &FormElementInstance) -> Vec<PropertyField> {
    Vec::new()
}

fn separator_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    PropertyReader::new(ElementType::SeparatorField, values).finish(&[])?;
    Ok(instance.clone())
}

// ============================================================================
// Spacer
// ============================================================================

pub static SPACER_FIELD: FormElement = FormElement {
    element_type: ElementType::SpacerField,
    palette: PaletteButton {
        label: "Spacer Field",
        icon: "separator-horizontal",
    },
    construct: construct_spacer,
    validate: always_valid,
    designer_component: spacer_designer,
    form_component: spacer_form,
    properties_component: spacer_properties,
    apply_properties: spacer_apply,
};

fn construct_spacer(id: &str) -> FormElementInstance {
    FormElementInstance::new(id, ElementAttributes::Spacer(SpacerAttributes { height: 20 }))
}

fn height_of(instance: &FormElementInstance) -> u32 {
    match instance.attributes() {
        ElementAttributes::Spacer(a) => a.height,
        _ => 0,
    }
}

fn spacer_designer(instance: &FormElementInstance) -> String {
    field_container(
        "spacer",
        &format!(
            "<label class=\"muted\">Spacer field: {}px</label>",
            height_of(instance)
        ),
    )
}

fn spacer_form(instance: &FormElementInstance, _: &FieldState<'_>) -> String {
    format!(
        "<div style=\"height: {}px; width: 100%\"></div>",
        height_of(instance)
    )
}

fn spacer_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    vec![PropertyField {
        name: "height",
        label: "Height (px)",
        description: "Vertical space between fields",
        kind: PropertyKind::Number {
            min: SPACER_HEIGHT.0,
            max: SPACER_HEIGHT.1,
        },
        value: PropertyValue::Number(height_of(instance)),
    }]
}

fn spacer_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let mut reader = PropertyReader::new(ElementType::SpacerField, values);
    let height = reader.number("height", height_of(instance), SPACER_HEIGHT);
    reader.finish(&["height"])?;
    Ok(instance.with_attributes(ElementAttributes::Spacer(SpacerAttributes { height })))
}
