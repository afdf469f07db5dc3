use tracing::{debug, info, warn};

use crate::{
    builder::notification::Notification,
    designer::{
        canvas::render_designer_page,
        designer_state::DesignerState,
        drag::{AppliedDrop, DragEngine, DragEvent, DragSource, DropTarget},
        ids::{IdSource, UuidIds},
    },
    element::{
        element_model::{ElementType, FormElementInstance, elements_to_json, parse_elements},
        html::escape_html,
        properties::{PropertyValues, apply_properties},
    },
    error::{BackendError, BuilderError},
    storage::{backend::FormBackend, form_model::FormRecord},
    submit::fill_session::FillSession,
    trace::{activity::ActivityEvent, logger::ActivityLogger},
};

/// SHA-1 of serialized content, used to skip saves that would change nothing.
pub fn content_fingerprint(content: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Content matches the last save; the backend was not called
    Unchanged,
}

/// One editing session of one form: the store, the drag engine, and the
/// save/publish flow around them.
///
/// The backend is borrowed per call rather than owned, so the same session
/// can be driven against a file store in tests and a remote one in the CLI.
pub struct FormBuilder {
    form: FormRecord,
    designer: DesignerState,
    drag: DragEngine,
    ids: Box<dyn IdSource>,
    last_saved: String,
    notifications: Vec<Notification>,
    activity: ActivityLogger,
    step: u64,
}

impl FormBuilder {
    /// Load a form and decode its content. Content that does not decode is
    /// fatal for the session.
    pub fn load(backend: &dyn FormBackend, form_id: u64) -> Result<Self, BuilderError> {
        let record = backend.load(form_id)?;
        Self::from_record(record)
    }

    pub fn from_record(form: FormRecord) -> Result<Self, BuilderError> {
        let elements = parse_elements(&form.content).map_err(|source| BuilderError::MalformedContent {
            form_id: form.id,
            source,
        })?;
        let designer = DesignerState::with_elements(elements).map_err(|source| BuilderError::InvalidContent {
            form_id: form.id,
            source,
        })?;

        debug!(form_id = form.id, elements = designer.len(), "builder session opened");
        let mut builder = Self {
            form,
            designer,
            drag: DragEngine::new(),
            ids: Box::new(UuidIds),
            last_saved: String::new(),
            notifications: Vec::new(),
            activity: ActivityLogger::disabled(),
            step: 0,
        };
        builder.last_saved = content_fingerprint(&builder.content()?);
        Ok(builder)
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_activity_log(mut self, logger: ActivityLogger) -> Self {
        self.activity = logger;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn designer(&self) -> &DesignerState {
        &self.designer
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn elements(&self) -> &[FormElementInstance] {
        self.designer.elements()
    }

    pub fn is_published(&self) -> bool {
        self.form.published
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Current element list as persisted content.
    pub fn content(&self) -> Result<String, BuilderError> {
        elements_to_json(self.designer.elements()).map_err(|source| {
            BuilderError::Backend(BackendError::Json {
                context: format!("form {} content", self.form.id),
                source,
            })
        })
    }

    /// Whether the element list differs from what was last saved or loaded.
    pub fn is_dirty(&self) -> bool {
        self.content()
            .map(|c| content_fingerprint(&c) != self.last_saved)
            .unwrap_or(true)
    }

    /// Public link of a published form.
    pub fn share_link(&self, base_url: &str) -> Option<String> {
        self.form.published.then(|| {
            format!(
                "{}/submit/{}",
                base_url.trim_end_matches('/'),
                self.form.share_url
            )
        })
    }

    // ========================================================================
    // Editing
    // ========================================================================

    fn ensure_editable(&self) -> Result<(), BuilderError> {
        if self.form.published {
            return Err(BuilderError::ReadOnly(self.form.id));
        }
        Ok(())
    }

    fn record(&mut self, action: &str, build: impl FnOnce(ActivityEvent) -> ActivityEvent) {
        if !self.activity.is_enabled() {
            return;
        }
        let event = build(ActivityEvent::now(self.form.id, self.step, action));
        self.step += 1;
        self.activity.log(&event);
    }

    /// Feed one gesture event to the drag engine.
    pub fn handle_drag(&mut self, event: DragEvent) -> Result<Option<AppliedDrop>, BuilderError> {
        self.ensure_editable()?;
        let applied = self
            .drag
            .handle(event, &mut self.designer, self.ids.as_mut())?;

        if let Some(applied) = applied.as_ref().filter(|a| !a.operation.is_noop()) {
            let element_type = self.designer.get(&applied.element_id).map(|e| e.element_type());
            let (id, operation) = (applied.element_id.clone(), applied.operation.clone());
            self.record("drop", |e| {
                let e = e.with_drop(&operation);
                match element_type {
                    Some(t) => e.with_element(&id, t),
                    None => e,
                }
            });
        }
        Ok(applied)
    }

    /// Drop a palette button onto the canvas (`None`) or onto an element
    /// half. Returns the new element's id.
    pub fn add_element(&mut self, element_type: ElementType, target: Option<DropTarget>) -> Result<String, BuilderError> {
        let target = target.unwrap_or(DropTarget::DesignerDropArea);
        let missing = match &target {
            DropTarget::ElementHalf { element_id, .. } => element_id.clone(),
            DropTarget::DesignerDropArea => String::new(),
        };

        self.handle_drag(DragEvent::Start {
            active: DragSource::PaletteButton { element_type },
        })?;
        self.handle_drag(DragEvent::Over {
            over: Some(target.clone()),
        })?;
        match self.handle_drag(DragEvent::End { over: Some(target) })? {
            Some(applied) => Ok(applied.element_id),
            None => Err(BuilderError::ElementNotFound(missing)),
        }
    }

    /// Drag an existing element onto another element's half. Returns false
    /// when the drop leaves the order unchanged.
    pub fn move_element(&mut self, element_id: &str, target: DropTarget) -> Result<bool, BuilderError> {
        self.ensure_editable()?;
        let element_type = self
            .designer
            .get(element_id)
            .map(|e| e.element_type())
            .ok_or_else(|| BuilderError::ElementNotFound(element_id.to_string()))?;
        if let DropTarget::ElementHalf { element_id: over, .. } = &target {
            if self.designer.get(over).is_none() {
                return Err(BuilderError::ElementNotFound(over.clone()));
            }
        }

        self.handle_drag(DragEvent::Start {
            active: DragSource::DesignerElement {
                element_id: element_id.to_string(),
                element_type,
            },
        })?;
        let applied = self.handle_drag(DragEvent::End { over: Some(target) })?;
        Ok(applied.is_some_and(|a| !a.operation.is_noop()))
    }

    pub fn remove_element(&mut self, element_id: &str) -> Result<Option<FormElementInstance>, BuilderError> {
        self.ensure_editable()?;
        let removed = self.designer.remove_element(element_id);
        if let Some(removed) = &removed {
            let element_type = removed.element_type();
            self.record("remove", |e| e.with_element(element_id, element_type));
        }
        Ok(removed)
    }

    pub fn select(&mut self, element_id: Option<&str>) {
        self.designer.set_selected_element(element_id);
    }

    /// Validate a properties form and replace the element with the result.
    /// Violations leave the element untouched.
    pub fn apply_properties(&mut self, element_id: &str, values: &PropertyValues) -> Result<FormElementInstance, BuilderError> {
        self.ensure_editable()?;
        let current = self
            .designer
            .get(element_id)
            .ok_or_else(|| BuilderError::ElementNotFound(element_id.to_string()))?;

        let updated = apply_properties(current, values)?;
        self.designer.update_element(element_id, updated.clone())?;

        let names: Vec<&str> = values.names().collect();
        let detail = names.join(",");
        self.record("properties", |e| {
            e.with_element(element_id, updated.element_type()).with_detail(detail)
        });
        Ok(updated)
    }

    /// Replace the whole element list, e.g. from an imported JSON document.
    pub fn replace_elements(&mut self, elements: Vec<FormElementInstance>) -> Result<(), BuilderError> {
        self.ensure_editable()?;
        self.designer.set_elements(elements)?;
        let count = self.designer.len();
        self.record("replace", |e| e.with_detail(format!("{} elements", count)));
        Ok(())
    }

    // ========================================================================
    // Save / publish
    // ========================================================================

    /// Persist the current element list. Skips the backend when nothing
    /// changed since the last save. A failure leaves state untouched and
    /// raises an error notification.
    pub fn save(&mut self, backend: &mut dyn FormBackend) -> Result<SaveOutcome, BuilderError> {
        self.ensure_editable()?;
        let content = self.content()?;
        let fingerprint = content_fingerprint(&content);
        if fingerprint == self.last_saved {
            debug!(form_id = self.form.id, "save skipped, content unchanged");
            return Ok(SaveOutcome::Unchanged);
        }

        if let Err(e) = backend.save_content(self.form.id, &content) {
            warn!(form_id = self.form.id, error = %e, "save failed");
            self.notifications
                .push(Notification::error("Something went wrong, please try again later"));
            return Err(e.into());
        }

        self.form.content = content;
        self.last_saved = fingerprint;
        info!(form_id = self.form.id, elements = self.designer.len(), "form saved");
        self.notifications
            .push(Notification::success("Your form has been saved"));
        self.record("save", |e| e);
        Ok(SaveOutcome::Saved)
    }

    /// Save pending changes, then publish. Irreversible: afterwards every
    /// edit returns `ReadOnly`.
    pub fn publish(&mut self, backend: &mut dyn FormBackend) -> Result<(), BuilderError> {
        self.ensure_editable()?;
        if self.is_dirty() {
            self.save(backend)?;
        }

        match backend.publish(self.form.id) {
            Ok(record) => {
                self.form = record;
                self.drag.drag_cancel();
                info!(form_id = self.form.id, share_url = %self.form.share_url, "form published");
                self.notifications
                    .push(Notification::success("Your form is now available to the public"));
                self.record("publish", |e| e);
                Ok(())
            }
            Err(e) => {
                warn!(form_id = self.form.id, error = %e, "publish failed");
                self.notifications
                    .push(Notification::error("Something went wrong, please try again later"));
                Err(e.into())
            }
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Designer page while editing, share page once published.
    pub fn render_html(&self, base_url: &str) -> String {
        if let Some(link) = self.share_link(base_url) {
            return format!(
                "<div class=\"published\">\n<h1>Form Published</h1>\n<h2>Share this form</h2>\n<p>Anyone with the link can view and submit the form</p>\n<input readonly value=\"{}\">\n<a href=\"/forms/{}\">Form details</a>\n</div>\n",
                escape_html(&link),
                self.form.id
            );
        }

        let mut out = format!(
            "<nav class=\"builder\"><h2>Form: {}</h2><div class=\"actions\"><button data-action=\"preview\">Preview</button><button data-action=\"save\">Save</button><button data-action=\"publish\">Publish</button></div></nav>\n",
            escape_html(&self.form.name)
        );
        out.push_str(&render_designer_page(&self.designer, &self.drag, None));
        out
    }

    /// The fillable form as a respondent would see it, without a submit
    /// action.
    pub fn render_preview(&self) -> String {
        FillSession::new(self.designer.elements().to_vec()).render_html(None)
    }
}
