//! One module per element type family. Each exposes a `static` registry
//! entry (`FormElement`) wired into `element::registry::form_element`.

pub mod checkbox_field;
pub mod date_field;
pub mod layout_fields;
pub mod number_field;
pub mod select_field;
pub mod text_field;

use crate::element::properties::{
    HELPER_TEXT_LEN, LABEL_LEN, PLACEHOLDER_LEN, PropertyField, PropertyKind, PropertyValue,
};

/// Rule shared by text-like inputs and dates: required means non-empty.
pub(crate) fn non_empty_when_required(required: bool, value: &str) -> bool {
    if required {
        return !value.is_empty();
    }
    true
}

/// Label, helper text, required switch, and optionally placeholder: the
/// properties every input element carries.
pub(crate) fn common_input_properties(
    label: &str,
    helper_text: &str,
    required: bool,
    place_holder: Option<&str>,
) -> Vec<PropertyField> {
    let mut fields = vec![PropertyField {
        name: "label",
        label: "Label",
        description: "The label of the field. It will be displayed above the field",
        kind: PropertyKind::Text {
            min: LABEL_LEN.0,
            max: LABEL_LEN.1,
        },
        value: PropertyValue::Text(label.to_string()),
    }];

    if let Some(place_holder) = place_holder {
        fields.push(PropertyField {
            name: "placeHolder",
            label: "PlaceHolder",
            description: "The placeholder of the field",
            kind: PropertyKind::Text {
                min: PLACEHOLDER_LEN.0,
                max: PLACEHOLDER_LEN.1,
            },
            value: PropertyValue::Text(place_holder.to_string()),
        });
    }

    fields.push(PropertyField {
        name: "helperText",
        label: "Helper Text",
        description: "The helper text of the field. It will be displayed below the field",
        kind: PropertyKind::Text {
            min: HELPER_TEXT_LEN.0,
            max: HELPER_TEXT_LEN.1,
        },
        value: PropertyValue::Text(helper_text.to_string()),
    });

    fields.push(PropertyField {
        name: "required",
        label: "Required",
        description: "Submissions are rejected while this field is empty",
        kind: PropertyKind::Toggle,
        value: PropertyValue::Bool(required),
    });

    fields
}
