use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::{
    error::{BackendError, SubmitError},
    storage::backend::FormBackend,
    submit::fill_session::FillSession,
};

/// Open the published form behind `share_url` for filling.
pub fn open_shared_form(backend: &dyn FormBackend, share_url: &str) -> Result<FillSession, SubmitError> {
    let record = backend.load_by_share_url(share_url)?;
    if !record.published {
        return Err(BackendError::NotPublished(record.id).into());
    }
    FillSession::from_content(&record.content).map_err(SubmitError::MalformedContent)
}

/// Fill in and submit a published form in one go.
///
/// Every input element is part of the payload; fields without a value are
/// submitted as empty strings. Nothing reaches the backend when validation
/// fails.
pub fn submit_form(
    backend: &mut dyn FormBackend,
    share_url: &str,
    values: &[(String, String)],
) -> Result<BTreeMap<String, String>, SubmitError> {
    let mut session = open_shared_form(backend, share_url)?;
    for (id, value) in values {
        session.set_value(id, value)?;
    }
    submit_session(backend, share_url, &mut session)
}

/// Validate a filled session and hand its values to the backend.
pub fn submit_session(
    backend: &mut dyn FormBackend,
    share_url: &str,
    session: &mut FillSession,
) -> Result<BTreeMap<String, String>, SubmitError> {
    let payload = session.submit()?;
    let content = serde_json::to_string(&payload).map_err(|e| BackendError::Json {
        context: "submission payload".to_string(),
        source: e,
    })?;

    if let Err(e) = backend.submit(share_url, &content) {
        warn!(share_url, error = %e, "submission failed");
        return Err(e.into());
    }
    info!(share_url, fields = payload.len(), "form submitted");
    Ok(payload)
}
