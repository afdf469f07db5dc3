use crate::{
    element::{
        element_model::{ElementAttributes, ElementType, FormElementInstance, SelectAttributes},
        html::{FieldState, control_name, escape_html, field_container, field_label, helper_text},
        properties::{
            HELPER_TEXT_LEN, LABEL_LEN, PLACEHOLDER_LEN, PropertyField, PropertyKind,
            PropertyReader, PropertyValue, PropertyValues,
        },
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
    fields::{common_input_properties, non_empty_when_required},
};

pub static SELECT_FIELD: FormElement = FormElement {
    element_type: ElementType::SelectField,
    palette: PaletteButton {
        label: "Select Field",
        icon: "select",
    },
    construct: construct_select,
    validate: validate_select,
    designer_component: select_designer,
    form_component: select_form,
    properties_component: select_properties,
    apply_properties: select_apply,
};

fn construct_select(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Select(SelectAttributes {
            label: "Select field".to_string(),
            helper_text: "Helper text".to_string(),
            required: false,
            place_holder: "value here".to_string(),
            options: Vec::new(),
        }),
    )
}

fn select_attrs(instance: &FormElementInstance) -> Option<&SelectAttributes> {
    match instance.attributes() {
        ElementAttributes::Select(a) => Some(a),
        _ => None,
    }
}

// Membership in `options` is not checked; only presence when required.
fn validate_select(instance: &FormElementInstance, value: &str) -> bool {
    match select_attrs(instance) {
        Some(a) => non_empty_when_required(a.required, value),
        None => true,
    }
}

fn select_designer(instance: &FormElementInstance) -> String {
    let Some(a) = select_attrs(instance) else {
        return String::new();
    };
    field_container(
        "select",
        &format!(
            "{}<select disabled><option>{}</option></select>{}",
            field_label(&a.label, a.required, false, None),
            escape_html(&a.place_holder),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn select_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = select_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());

    let mut options = format!(
        "<option value=\"\" disabled{}>{}</option>",
        if state.value.is_empty() { " selected" } else { "" },
        escape_html(&a.place_holder)
    );
    for option in &a.options {
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            escape_html(option),
            if option == state.value { " selected" } else { "" },
            escape_html(option)
        ));
    }

    field_container(
        "select",
        &format!(
            "{}<select id=\"{name}\" name=\"{name}\"{}>{}</select>{}",
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            if state.invalid { " class=\"invalid\"" } else { "" },
            options,
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn select_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    let Some(a) = select_attrs(instance) else {
        return Vec::new();
    };
    let mut fields =
        common_input_properties(&a.label, &a.helper_text, a.required, Some(a.place_holder.as_str()));
    fields.push(PropertyField {
        name: "options",
        label: "Options",
        description: "Choices offered by the select",
        kind: PropertyKind::OptionList,
        value: PropertyValue::List(a.options.clone()),
    });
    fields
}

fn select_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = select_attrs(instance) else {
        return Ok(instance.clone());
    };

    let mut reader = PropertyReader::new(ElementType::SelectField, values);
    let label = reader.text("label", &current.label, LABEL_LEN);
    let helper_text = reader.text("helperText", &current.helper_text, HELPER_TEXT_LEN);
    let required = reader.toggle("required", current.required);
    let place_holder = reader.text("placeHolder", &current.place_holder, PLACEHOLDER_LEN);
    let options = reader.list("options", &current.options);
    reader.finish(&["label", "helperText", "required", "placeHolder", "options"])?;

    Ok(instance.with_attributes(ElementAttributes::Select(SelectAttributes {
        label,
        helper_text,
        required,
        place_holder,
        options,
    })))
}
