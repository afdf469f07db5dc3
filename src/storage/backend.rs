use crate::{
    error::BackendError,
    storage::form_model::{FormRecord, FormSubmission},
};

/// Persistence collaborator behind the builder and the public submit page.
pub trait FormBackend {
    fn create(&mut self, name: &str, description: &str) -> Result<FormRecord, BackendError>;

    /// All forms, newest first.
    fn list(&self) -> Result<Vec<FormRecord>, BackendError>;

    fn load(&self, form_id: u64) -> Result<FormRecord, BackendError>;

    fn load_by_share_url(&self, share_url: &str) -> Result<FormRecord, BackendError>;

    /// Overwrite the element list. Saving identical content twice is harmless.
    fn save_content(&mut self, form_id: u64, content: &str) -> Result<(), BackendError>;

    /// Irreversible. Returns the published record.
    fn publish(&mut self, form_id: u64) -> Result<FormRecord, BackendError>;

    /// Store a submission against the published form behind `share_url`.
    fn submit(&mut self, share_url: &str, content: &str) -> Result<(), BackendError>;

    /// Submissions of one form, oldest first.
    fn submissions(&self, form_id: u64) -> Result<Vec<FormSubmission>, BackendError>;
}
