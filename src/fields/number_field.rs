use crate::{
    element::{
        element_model::{ElementAttributes, ElementType, FormElementInstance, InputAttributes},
        html::{FieldState, control_name, escape_html, field_container, field_label, helper_text},
        properties::{PropertyField, PropertyValues},
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
    fields::{common_input_properties, non_empty_when_required, text_field::read_input_attributes},
};

pub static NUMBER_FIELD: FormElement = FormElement {
    element_type: ElementType::NumberField,
    palette: PaletteButton {
        label: "Number Field",
        icon: "numbers",
    },
    construct: construct_number,
    validate: validate_number,
    designer_component: number_designer,
    form_component: number_form,
    properties_component: number_properties,
    apply_properties: number_apply,
};

fn construct_number(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Number(InputAttributes {
            label: "Number field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            place_holder: "0".to_string(),
        }),
    )
}

fn number_attrs(instance: &FormElementInstance) -> Option<&InputAttributes> {
    match instance.attributes() {
        ElementAttributes::Number(a) => Some(a),
        _ => None,
    }
}

// Same acceptance rule as text: only presence is checked, not numeric form.
fn validate_number(instance: &FormElementInstance, value: &str) -> bool {
    match number_attrs(instance) {
        Some(a) => non_empty_when_required(a.required, value),
        None => true,
    }
}

fn number_designer(instance: &FormElementInstance) -> String {
    let Some(a) = number_attrs(instance) else {
        return String::new();
    };
    field_container(
        "number",
        &format!(
            "{}<input type=\"number\" readonly disabled placeholder=\"{}\">{}",
            field_label(&a.label, a.required, false, None),
            escape_html(&a.place_holder),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn number_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = number_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());
    field_container(
        "number",
        &format!(
            "{}<input type=\"number\" id=\"{name}\" name=\"{name}\" placeholder=\"{}\" value=\"{}\"{}>{}",
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            escape_html(&a.place_holder),
            escape_html(state.value),
            if state.invalid { " class=\"invalid\"" } else { "" },
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn number_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    match number_attrs(instance) {
        Some(a) => common_input_properties(&a.label, &a.helper_text, a.required, Some(a.place_holder.as_str())),
        None => Vec::new(),
    }
}

fn number_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = number_attrs(instance) else {
        return Ok(instance.clone());
    };
    let attrs = read_input_attributes(ElementType::NumberField, current, values)?;
    Ok(instance.with_attributes(ElementAttributes::Number(attrs)))
}
