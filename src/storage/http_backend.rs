use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::BackendError,
    storage::{
        backend::FormBackend,
        form_model::{FormRecord, FormSubmission},
    },
};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api";

/// JSON REST client for a remote form store.
pub struct HttpBackend {
    pub endpoint: String,
    client: Client,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct ContentBody<'a> {
    content: &'a str,
}

impl HttpBackend {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Absolute URL of an API path (`path` starts with `/`).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Send a request; a 404 means `not_found` is missing, any other
    /// non-success status is reported with its body.
    fn send(&self, request: RequestBuilder, context: &str, not_found: &str) -> Result<reqwest::blocking::Response, BackendError> {
        debug!(context, "backend request");
        let response = request.send().map_err(|e| BackendError::Http {
            context: context.to_string(),
            source: e,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::FormNotFound(not_found.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Status {
                context: context.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        not_found: &str,
    ) -> Result<T, BackendError> {
        self.send(request, context, not_found)?
            .json()
            .map_err(|e| BackendError::Http {
                context: context.to_string(),
                source: e,
            })
    }
}

impl FormBackend for HttpBackend {
    fn create(&mut self, name: &str, description: &str) -> Result<FormRecord, BackendError> {
        let request = self
            .client
            .post(self.url_for("/forms"))
            .json(&CreateRequest { name, description });
        self.send_json(request, "create form", name)
    }

    fn list(&self) -> Result<Vec<FormRecord>, BackendError> {
        let request = self.client.get(self.url_for("/forms"));
        self.send_json(request, "list forms", "forms")
    }

    fn load(&self, form_id: u64) -> Result<FormRecord, BackendError> {
        let request = self.client.get(self.url_for(&format!("/forms/{}", form_id)));
        self.send_json(request, "load form", &form_id.to_string())
    }

    fn load_by_share_url(&self, share_url: &str) -> Result<FormRecord, BackendError> {
        let request = self
            .client
            .get(self.url_for(&format!("/forms/share/{}", share_url)));
        self.send_json(request, "load shared form", share_url)
    }

    fn save_content(&mut self, form_id: u64, content: &str) -> Result<(), BackendError> {
        let request = self
            .client
            .put(self.url_for(&format!("/forms/{}/content", form_id)))
            .json(&ContentBody { content });
        self.send(request, "save form content", &form_id.to_string())?;
        Ok(())
    }

    fn publish(&mut self, form_id: u64) -> Result<FormRecord, BackendError> {
        let request = self
            .client
            .post(self.url_for(&format!("/forms/{}/publish", form_id)));
        self.send_json(request, "publish form", &form_id.to_string())
    }

    fn submit(&mut self, share_url: &str, content: &str) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.url_for(&format!("/submit/{}", share_url)))
            .json(&ContentBody { content });
        self.send(request, "submit form", share_url)?;
        Ok(())
    }

    fn submissions(&self, form_id: u64) -> Result<Vec<FormSubmission>, BackendError> {
        let request = self
            .client
            .get(self.url_for(&format!("/forms/{}/submissions", form_id)));
        self.send_json(request, "list submissions", &form_id.to_string())
    }
}
