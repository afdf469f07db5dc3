use std::fmt;

use crate::element::element_model::ElementType;

// ============================================================================
// Designer store errors
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// An element with this id is already in the list
    DuplicateId(String),

    /// Insert position past the end of the list
    IndexOutOfRange { index: usize, len: usize },

    /// Replacement would change the element's type
    TypeMismatch {
        id: String,
        expected: ElementType,
        found: ElementType,
    },

    /// Replacement carries a different id than the one being updated
    IdMismatch { id: String, found: String },
}

impl fmt::Display for DesignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignerError::DuplicateId(id) => {
                write!(f, "Element '{}' is already on the form", id)
            }
            DesignerError::IndexOutOfRange { index, len } => {
                write!(f, "Insert index {} out of range for {} elements", index, len)
            }
            DesignerError::TypeMismatch { id, expected, found } => {
                write!(f, "Element '{}' is a {}, cannot become a {}", id, expected, found)
            }
            DesignerError::IdMismatch { id, found } => {
                write!(f, "Replacement for '{}' carries id '{}'", id, found)
            }
        }
    }
}

impl std::error::Error for DesignerError {}

// ============================================================================
// Properties form errors
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// Text shorter than the allowed minimum (in characters)
    TooShort { property: String, min: usize },

    /// Text longer than the allowed maximum (in characters)
    TooLong { property: String, max: usize },

    /// Number outside the inclusive range
    OutOfRange { property: String, min: u32, max: u32 },

    /// Value could not be parsed for the property's kind
    InvalidValue { property: String, value: String },

    /// Property does not exist on this element type
    UnknownProperty { property: String, element_type: ElementType },
}

impl PropertyError {
    pub fn property(&self) -> &str {
        match self {
            PropertyError::TooShort { property, .. }
            | PropertyError::TooLong { property, .. }
            | PropertyError::OutOfRange { property, .. }
            | PropertyError::InvalidValue { property, .. }
            | PropertyError::UnknownProperty { property, .. } => property,
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::TooShort { property, min } => {
                write!(f, "{} must contain at least {} character(s)", property, min)
            }
            PropertyError::TooLong { property, max } => {
                write!(f, "{} must contain at most {} character(s)", property, max)
            }
            PropertyError::OutOfRange { property, min, max } => {
                write!(f, "{} must be between {} and {}", property, min, max)
            }
            PropertyError::InvalidValue { property, value } => {
                write!(f, "Invalid value '{}' for {}", value, property)
            }
            PropertyError::UnknownProperty {
                property,
                element_type,
            } => {
                write!(f, "{} has no property '{}'", element_type, property)
            }
        }
    }
}

impl std::error::Error for PropertyError {}

/// All property violations found while applying one properties form.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyErrors(pub Vec<PropertyError>);

impl PropertyErrors {
    pub fn for_property(&self, property: &str) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| e.property() == property).collect()
    }
}

impl fmt::Display for PropertyErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for PropertyErrors {}

// ============================================================================
// Storage backend errors
// ============================================================================

#[derive(Debug)]
pub enum BackendError {
    /// Filesystem access failed
    Io { context: String, source: std::io::Error },

    /// Stored record could not be (de)serialized
    Json { context: String, source: serde_json::Error },

    /// HTTP request could not be sent or its body not decoded
    Http { context: String, source: reqwest::Error },

    /// Remote service answered with a non-success status
    Status { context: String, status: u16, body: String },

    /// No form with this id or share URL
    FormNotFound(String),

    /// Form is not published, so it cannot take submissions
    NotPublished(u64),

    /// Form is published, so its content can no longer change
    AlreadyPublished(u64),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Io { context, source } => {
                write!(f, "I/O error ({}): {}", context, source)
            }
            BackendError::Json { context, source } => {
                write!(f, "JSON error ({}): {}", context, source)
            }
            BackendError::Http { context, source } => {
                write!(f, "HTTP error ({}): {}", context, source)
            }
            BackendError::Status {
                context,
                status,
                body,
            } => {
                write!(f, "{} returned status {}: {}", context, status, body)
            }
            BackendError::FormNotFound(key) => write!(f, "Form '{}' not found", key),
            BackendError::NotPublished(id) => write!(f, "Form {} is not published", id),
            BackendError::AlreadyPublished(id) => write!(f, "Form {} is already published", id),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Io { source, .. } => Some(source),
            BackendError::Json { source, .. } => Some(source),
            BackendError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Builder session errors
// ============================================================================

#[derive(Debug)]
pub enum BuilderError {
    /// Persisted content is not a valid element list; fatal for the session
    MalformedContent { form_id: u64, source: serde_json::Error },

    /// Persisted content decoded but breaks a list invariant
    InvalidContent { form_id: u64, source: DesignerError },

    /// Load, save, or publish request failed
    Backend(BackendError),

    /// Store rejected a mutation
    Designer(DesignerError),

    /// Properties form has violations
    Properties(PropertyErrors),

    /// No element with this id on the form
    ElementNotFound(String),

    /// Form is published; the designer is read-only
    ReadOnly(u64),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::MalformedContent { form_id, source } => {
                write!(f, "Form {} has malformed content: {}", form_id, source)
            }
            BuilderError::InvalidContent { form_id, source } => {
                write!(f, "Form {} has invalid content: {}", form_id, source)
            }
            BuilderError::Backend(e) => write!(f, "{}", e),
            BuilderError::Designer(e) => write!(f, "{}", e),
            BuilderError::Properties(e) => write!(f, "Invalid properties: {}", e),
            BuilderError::ElementNotFound(id) => write!(f, "Element '{}' not found", id),
            BuilderError::ReadOnly(id) => {
                write!(f, "Form {} is published and can no longer be edited", id)
            }
        }
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuilderError::MalformedContent { source, .. } => Some(source),
            BuilderError::InvalidContent { source, .. } => Some(source),
            BuilderError::Backend(e) => Some(e),
            BuilderError::Designer(e) => Some(e),
            BuilderError::Properties(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BackendError> for BuilderError {
    fn from(e: BackendError) -> Self {
        BuilderError::Backend(e)
    }
}

impl From<DesignerError> for BuilderError {
    fn from(e: DesignerError) -> Self {
        BuilderError::Designer(e)
    }
}

impl From<PropertyErrors> for BuilderError {
    fn from(e: PropertyErrors) -> Self {
        BuilderError::Properties(e)
    }
}

// ============================================================================
// Public submission errors
// ============================================================================

/// Submission blocked client-side: these input elements failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRejected {
    pub invalid: Vec<String>,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} field(s) failed validation: {}",
            self.invalid.len(),
            self.invalid.join(", ")
        )
    }
}

impl std::error::Error for SubmitRejected {}

#[derive(Debug)]
pub enum SubmitError {
    /// Loading the form or persisting the submission failed
    Backend(BackendError),

    /// Published content is not a valid element list
    MalformedContent(serde_json::Error),

    /// Value given for an id that is not an input element of the form
    UnknownField(String),

    /// Validation rejected the submission
    Rejected(SubmitRejected),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Backend(e) => write!(f, "{}", e),
            SubmitError::MalformedContent(e) => write!(f, "Form has malformed content: {}", e),
            SubmitError::UnknownField(id) => write!(f, "Form has no input field '{}'", id),
            SubmitError::Rejected(e) => write!(f, "Submission rejected: {}", e),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Backend(e) => Some(e),
            SubmitError::MalformedContent(e) => Some(e),
            SubmitError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BackendError> for SubmitError {
    fn from(e: BackendError) -> Self {
        SubmitError::Backend(e)
    }
}

impl From<SubmitRejected> for SubmitError {
    fn from(e: SubmitRejected) -> Self {
        SubmitError::Rejected(e)
    }
}
