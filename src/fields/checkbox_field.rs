use crate::{
    element::{
        element_model::{BasicAttributes, ElementAttributes, ElementType, FormElementInstance},
        html::{FieldState, control_name, escape_html, field_container, field_label, helper_text},
        properties::{HELPER_TEXT_LEN, LABEL_LEN, PropertyField, PropertyReader, PropertyValues},
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
    fields::common_input_properties,
};

/// Value submitted for a ticked checkbox. Anything else reads as unticked.
pub const CHECKED: &str = "true";

pub static CHECKBOX_FIELD: FormElement = FormElement {
    element_type: ElementType::CheckBoxField,
    palette: PaletteButton {
        label: "CheckBox Field",
        icon: "checkbox",
    },
    construct: construct_checkbox,
    validate: validate_checkbox,
    designer_component: checkbox_designer,
    form_component: checkbox_form,
    properties_component: checkbox_properties,
    apply_properties: checkbox_apply,
};

fn construct_checkbox(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::CheckBox(BasicAttributes {
            label: "CheckBox field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
        }),
    )
}

fn checkbox_attrs(instance: &FormElementInstance) -> Option<&BasicAttributes> {
    match instance.attributes() {
        ElementAttributes::CheckBox(a) => Some(a),
        _ => None,
    }
}

/// A required checkbox must be ticked; an optional one accepts anything.
fn validate_checkbox(instance: &FormElementInstance, value: &str) -> bool {
    match checkbox_attrs(instance) {
        Some(a) if a.required => value == CHECKED,
        _ => true,
    }
}

fn checkbox_designer(instance: &FormElementInstance) -> String {
    let Some(a) = checkbox_attrs(instance) else {
        return String::new();
    };
    field_container(
        "checkbox",
        &format!(
            "<input type=\"checkbox\" disabled>{}{}",
            field_label(&a.label, a.required, false, None),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn checkbox_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = checkbox_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());
    field_container(
        "checkbox",
        &format!(
            "<input type=\"checkbox\" id=\"{name}\" name=\"{name}\" value=\"{CHECKED}\"{}{}>{}{}",
            if state.value == CHECKED { " checked" } else { "" },
            if state.invalid { " class=\"invalid\"" } else { "" },
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn checkbox_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    match checkbox_attrs(instance) {
        Some(a) => common_input_properties(&a.label, &a.helper_text, a.required, None),
        None => Vec::new(),
    }
}

fn checkbox_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = checkbox_attrs(instance) else {
        return Ok(instance.clone());
    };

    let mut reader = PropertyReader::new(ElementType::CheckBoxField, values);
    let label = reader.text("label", &current.label, LABEL_LEN);
    let helper_text = reader.text("helperText", &current.helper_text, HELPER_TEXT_LEN);
    let required = reader.toggle("required", current.required);
    reader.finish(&["label", "helperText", "required"])?;

    Ok(instance.with_attributes(ElementAttributes::CheckBox(BasicAttributes {
        label,
        helper_text,
        required,
    })))
}
