// ============================================================================
// HTML fragments shared by the field renderers
// ============================================================================

/// Current value and error flag of one control in a fillable form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldState<'a> {
    pub value: &'a str,
    pub invalid: bool,
}

impl<'a> FieldState<'a> {
    pub fn new(value: &'a str, invalid: bool) -> Self {
        Self { value, invalid }
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<label>` with a trailing `*` for required fields.
pub fn field_label(label: &str, required: bool, invalid: bool, for_id: Option<&str>) -> String {
    let class = if invalid { " class=\"invalid\"" } else { "" };
    let for_attr = for_id
        .map(|id| format!(" for=\"{}\"", escape_html(id)))
        .unwrap_or_default();
    let marker = if required { " *" } else { "" };
    format!("<label{}{}>{}{}</label>", for_attr, class, escape_html(label), marker)
}

/// Helper paragraph under a control; empty helper text renders nothing.
pub fn helper_text(text: &str, invalid: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    let class = if invalid { "helper invalid" } else { "helper" };
    format!("<p class=\"{}\">{}</p>", class, escape_html(text))
}

/// Wrap a field body in the container every renderer shares.
pub fn field_container(kind: &str, body: &str) -> String {
    format!("<div class=\"field field-{}\">{}</div>", kind, body)
}

/// Name attribute used for a control in the fillable form. Unescaped;
/// attribute writers escape it.
pub fn control_name(id: &str) -> String {
    format!("field-{}", id)
}
