use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored form. `content` is the serialized element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "empty_content")]
    pub content: String,
    #[serde(default)]
    pub published: bool,
    pub share_url: String,
    pub created_at: DateTime<Utc>,
}

/// Content of a form nobody has designed yet.
pub fn empty_content() -> String {
    "[]".to_string()
}

/// One stored submission. `content` maps element ids to submitted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub form_id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
