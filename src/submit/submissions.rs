use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::{
    element::element_model::{ElementType, FormElementInstance},
    fields::{checkbox_field::CHECKED, date_field::parse_date_value},
    storage::form_model::FormSubmission,
};

// ============================================================================
// Submissions table model
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionColumn {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub element_type: ElementType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRow {
    pub cells: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTable {
    pub columns: Vec<SubmissionColumn>,
    pub rows: Vec<SubmissionRow>,
}

impl SubmissionTable {
    /// Columns are the form's input elements in order. Submissions whose
    /// content is not a JSON object still get a row, with empty cells.
    pub fn build(elements: &[FormElementInstance], submissions: &[FormSubmission]) -> Self {
        let columns: Vec<SubmissionColumn> = elements
            .iter()
            .filter(|e| !e.element_type().is_structural())
            .map(|e| SubmissionColumn {
                id: e.id().to_string(),
                label: e.attributes().label().unwrap_or_default().to_string(),
                required: e.attributes().required(),
                element_type: e.element_type(),
            })
            .collect();

        let rows = submissions
            .iter()
            .map(|s| {
                let content: BTreeMap<String, Value> = match serde_json::from_str(&s.content) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!(form_id = s.form_id, error = %e, "submission content is not a JSON object, row left empty");
                        BTreeMap::new()
                    }
                };
                let cells = columns
                    .iter()
                    .filter_map(|c| {
                        content
                            .get(&c.id)
                            .map(|v| (c.id.clone(), format_cell(c.element_type, &value_text(v))))
                    })
                    .collect();
                SubmissionRow {
                    cells,
                    submitted_at: s.created_at,
                }
            })
            .collect();

        Self { columns, rows }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Display form of a submitted value: dates as `dd/MM/yyyy`, checkboxes as
/// checked/unchecked, everything else verbatim.
pub fn format_cell(element_type: ElementType, raw: &str) -> String {
    match element_type {
        ElementType::DateField => parse_date_value(raw)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
        ElementType::CheckBoxField => {
            if raw == CHECKED {
                "checked".to_string()
            } else {
                "unchecked".to_string()
            }
        }
        _ => raw.to_string(),
    }
}

// ============================================================================
// Console rendering
// ============================================================================

/// Plain-text table for the terminal:
///
/// ```text
/// === Submissions: 2 ===
///
/// Name | Subscribe | Submitted at
/// Ada | checked | 2024-10-01 09:30
/// ```
pub fn format_console_table(table: &SubmissionTable) -> String {
    let mut out = format!("=== Submissions: {} ===\n\n", table.rows.len());

    if table.rows.is_empty() {
        out.push_str("No submissions yet\n");
        return out;
    }

    let mut header: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            if c.required {
                format!("{} *", c.label)
            } else {
                c.label.clone()
            }
        })
        .collect();
    header.push("Submitted at".to_string());
    out.push_str(&header.join(" | "));
    out.push('\n');

    for row in &table.rows {
        let mut cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| row.cells.get(&c.id).cloned().unwrap_or_default())
            .collect();
        cells.push(row.submitted_at.format("%Y-%m-%d %H:%M").to_string());
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}
