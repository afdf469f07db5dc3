use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{
    element::{
        element_model::{BasicAttributes, ElementAttributes, ElementType, FormElementInstance},
        html::{FieldState, control_name, escape_html, field_container, field_label, helper_text},
        properties::{HELPER_TEXT_LEN, LABEL_LEN, PropertyField, PropertyReader, PropertyValues},
        registry::{FormElement, PaletteButton},
    },
    error::PropertyErrors,
    fields::{common_input_properties, non_empty_when_required},
};

/// Format used for submitted date values, e.g. `Tue, 01 Oct 2024 00:00:00 GMT`.
pub const DATE_VALUE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub static DATE_FIELD: FormElement = FormElement {
    element_type: ElementType::DateField,
    palette: PaletteButton {
        label: "Date Field",
        icon: "calendar",
    },
    construct: construct_date,
    validate: validate_date,
    designer_component: date_designer,
    form_component: date_form,
    properties_component: date_properties,
    apply_properties: date_apply,
};

fn construct_date(id: &str) -> FormElementInstance {
    FormElementInstance::new(
        id,
        ElementAttributes::Date(BasicAttributes {
            label: "Date field".to_string(),
            helper_text: "Pick a date".to_string(),
            required: false,
        }),
    )
}

fn date_attrs(instance: &FormElementInstance) -> Option<&BasicAttributes> {
    match instance.attributes() {
        ElementAttributes::Date(a) => Some(a),
        _ => None,
    }
}

fn validate_date(instance: &FormElementInstance, value: &str) -> bool {
    match date_attrs(instance) {
        Some(a) => non_empty_when_required(a.required, value),
        None => true,
    }
}

// ============================================================================
// Date value serialization
// ============================================================================

/// Serialize a picked calendar date the way the fillable form submits it:
/// midnight UTC in HTTP-date style.
pub fn date_value(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format(DATE_VALUE_FORMAT)
        .to_string()
}

/// Parse a submitted date value. Accepts the HTTP-date style produced by
/// `date_value` as well as plain `YYYY-MM-DD`.
pub fn parse_date_value(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

// ============================================================================
// Rendering
// ============================================================================

fn date_designer(instance: &FormElementInstance) -> String {
    let Some(a) = date_attrs(instance) else {
        return String::new();
    };
    field_container(
        "date",
        &format!(
            "{}<button type=\"button\" disabled><i class=\"icon icon-calendar\"></i><span>Pick a date</span></button>{}",
            field_label(&a.label, a.required, false, None),
            helper_text(&a.helper_text, false)
        ),
    )
}

fn date_form(instance: &FormElementInstance, state: &FieldState<'_>) -> String {
    let Some(a) = date_attrs(instance) else {
        return String::new();
    };
    let name = control_name(instance.id());
    let picked = parse_date_value(state.value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    field_container(
        "date",
        &format!(
            "{}<input type=\"date\" id=\"{name}\" name=\"{name}\" value=\"{}\"{}>{}",
            field_label(&a.label, a.required, state.invalid, Some(name.as_str())),
            picked,
            if state.invalid { " class=\"invalid\"" } else { "" },
            helper_text(&a.helper_text, state.invalid),
            name = escape_html(&name),
        ),
    )
}

fn date_properties(instance: &FormElementInstance) -> Vec<PropertyField> {
    match date_attrs(instance) {
        Some(a) => common_input_properties(&a.label, &a.helper_text, a.required, None),
        None => Vec::new(),
    }
}

fn date_apply(
    instance: &FormElementInstance,
    values: &PropertyValues,
) -> Result<FormElementInstance, PropertyErrors> {
    let Some(current) = date_attrs(instance) else {
        return Ok(instance.clone());
    };

    let mut reader = PropertyReader::new(ElementType::DateField, values);
    let label = reader.text("label", &current.label, LABEL_LEN);
    let helper_text = reader.text("helperText", &current.helper_text, HELPER_TEXT_LEN);
    let required = reader.toggle("required", current.required);
    reader.finish(&["label", "helperText", "required"])?;

    Ok(instance.with_attributes(ElementAttributes::Date(BasicAttributes {
        label,
        helper_text,
        required,
    })))
}
