use crate::{
    element::{
        element_model::{
            ElementAttributes, ElementType, FormElementInstance, InputAttributes,
            TextAreaAttributes,
        },
        html::{FieldState, control_name, escape_html, field_container, field_label, helper_text},
        properties::{
            HELPER_TEXT_LEN, LABEL_LEN, PLACEHOLDER_LEN, PropertyField, PropertyKind,
            PropertyReader, PropertyValue, PropertyValues, TEXTAREA_ROWS,
        },
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
    fields::{common_input_properties, non_empty_when_required},
};

// ============================================================================
// Short text
// ============================================================================

pub static TEXT_FIELD: FormElement = FormElement {
    element_type: ElementType::TextField,
    palette: PaletteButton {
        label: "Text Field",
        icon: "text-fields",
    },
    construct: construct_text,
    validate: validate_text,
    designer_component: text_designer,
    form_component: text_form,
    properties_component: text_properties,
    apply_properties: text_apply,
};

fn construct_text(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Text(InputAttributes {
            label: "Text field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            place_holder: "Value here...".to_string(),
        }),
    )
}

fn text_attrs(instance: &FormElementInstance) -> Option<&InputAttributes> {
    match instance.attributes() {
        ElementAttributes::Text(a) => Some(a),
        _ => None,
    }
}

fn validate_text(instance: &FormElementInstance, value: &str) -> bool {
    match text_attrs(instance) {
        Some(a) => non_empty_when_required(a.required, value),
        None => true,
    }
}

fn text_designer(instance: &FormElementInstance) -> String {
    let Some(a) = text_attrs(instance) else {
        return String::new();
    };
    field_container(
        "text",
        &format!(
            "{}<input type=\"text\" readonly disabled placeholder=\"{}\">{}",
            field_label(&a.label, a.required, false, None),
            escape_html(&a.place_holder),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn text_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = text_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());
    field_container(
        "text",
        &format!(
            "{}<input type=\"text\" id=\"{name}\" name=\"{name}\" placeholder=\"{}\" value=\"{}\"{}>{}",
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            escape_html(&a.place_holder),
            escape_html(state.value),
            if state.invalid { " class=\"invalid\"" } else { "" },
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn text_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    match text_attrs(instance) {
        Some(a) => common_input_properties(&a.label, &a.helper_text, a.required, Some(a.place_holder.as_str())),
        None => Vec::new(),
    }
}

fn text_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = text_attrs(instance) else {
        return Ok(instance.clone());
    };
    let attrs = read_input_attributes(ElementType::TextField, current, values)?;
    Ok(instance.with_attributes(ElementAttributes::Text(attrs)))
}

/// Shared with the number field: label, placeholder, helper text, required.
pub(crate) fn read_input_attributes(
    element_type: ElementType,
    current: &InputAttributes,
    values: &PropertyValues,
) -> Result<InputAttributes, PropertyErrors> {
    let mut reader = PropertyReader::new(element_type, values);
    let label = reader.text("label", &current.label, LABEL_LEN);
    let helper_text = reader.text("helperText", &current.helper_text, HELPER_TEXT_LEN);
    let required = reader.toggle("required", current.required);
    let place_holder = reader.text("placeHolder", &current.place_holder, PLACEHOLDER_LEN);
    reader.finish(&["label", "helperText", "required", "placeHolder"])?;

    Ok(InputAttributes {
        label,
        helper_text,
        required,
        place_holder,
    })
}

// ============================================================================
// Long text
// ============================================================================

pub static TEXTAREA_FIELD: FormElement = FormElement {
    element_type: ElementType::TextAreaField,
    palette: PaletteButton {
        label: "TextArea Field",
        icon: "text-area",
    },
    construct: construct_textarea,
    validate: validate_textarea,
    designer_component: textarea_designer,
    form_component: textarea_form,
    properties_component: textarea_properties,
    apply_properties: textarea_apply,
};

fn construct_textarea(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::TextArea(TextAreaAttributes {
            label: "Text area".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            place_holder: "Value here...".to_string(),
            rows: 3,
        }),
    )
}

fn textarea_attrs(instance: &FormElementInstance) -> Option<&TextAreaAttributes> {
    match instance.attributes() {
        ElementAttributes::TextArea(a) => Some(a),
        _ => None,
    }
}

fn validate_textarea(instance: &FormElementInstance, value: &str) -> bool {
    match textarea_attrs(instance) {
        Some(a) => non_empty_when_required(a.required, value),
        None => true,
    }
}

fn textarea_designer(instance: &FormElementInstance) -> String {
    let Some(a) = textarea_attrs(instance) else {
        return String::new();
    };
    field_container(
        "textarea",
        &format!(
            "{}<textarea readonly disabled rows=\"{}\" placeholder=\"{}\"></textarea>{}",
            field_label(&a.label, a.required, false, None),
            a.rows,
            escape_html(&a.place_holder),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn textarea_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = textarea_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());
    field_container(
        "textarea",
        &format!(
            "{}<textarea id=\"{name}\" name=\"{name}\" rows=\"{}\" placeholder=\"{}\"{}>{}</textarea>{}",
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            a.rows,
            escape_html(&a.place_holder),
            if state.invalid { " class=\"invalid\"" } else { "" },
            escape_html(state.value),
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn textarea_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    let Some(a) = textarea_attrs(instance) else {
        return Vec::new();
    };
    let mut fields =
        common_input_properties(&a.label, &a.helper_text, a.required, Some(a.place_holder.as_str()));
    fields.push(PropertyField {
        name: "rows",
        label: "Rows",
        description: "Visible height of the text area",
        kind: PropertyKind::Number {
            min: TEXTAREA_ROWS.0,
            max: TEXTAREA_ROWS.1,
        },
        value: PropertyValue::Number(a.rows),
    });
    fields
}

fn textarea_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = textarea_attrs(instance) else {
        return Ok(instance.clone());
    };

    let mut reader = PropertyReader::new(ElementType::TextAreaField, values);
    let label = reader.text("label", &current.label, LABEL_LEN);
    let helper_text = reader.text("helperText", &current.helper_text, HELPER_TEXT_LEN);
    let required = reader.toggle("required", current.required);
    let place_holder = reader.text("placeHolder", &current.place_holder, PLACEHOLDER_LEN);
    let rows = reader.number("rows", current.rows, TEXTAREA_ROWS);
    reader.finish(&["label", "helperText", "required", "placeHolder", "rows"])?;

    Ok(instance.with_attributes(ElementAttributes::TextArea(TextAreaAttributes {
        label,
        helper_text,
        required,
        place_holder,
        rows,
    })))
}
