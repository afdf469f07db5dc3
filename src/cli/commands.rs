use std::error::Error;

use tracing::info;

use crate::{
    builder::form_builder::{FormBuilder, SaveOutcome},
    cli::config::{BackendKind, RenderView, Settings},
    designer::drag::DropTarget,
    element::{
        element_model::{ElementType, parse_elements},
        properties::PropertyValues,
    },
    error::BuilderError,
    storage::{
        backend::FormBackend,
        file_backend::FileBackend,
        http_backend::{DEFAULT_ENDPOINT, HttpBackend},
    },
    submit::{
        public::submit_form,
        submissions::{SubmissionTable, format_console_table},
    },
    trace::logger::ActivityLogger,
};

type CmdResult<T> = Result<T, Box<dyn Error>>;

// ============================================================================
// Backend / session setup
// ============================================================================

pub fn open_backend(settings: &Settings) -> CmdResult<Box<dyn FormBackend>> {
    match settings.backend {
        BackendKind::File => Ok(Box::new(FileBackend::open(&settings.data_dir)?)),
        BackendKind::Http => Ok(Box::new(HttpBackend::new(
            settings.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
        ))),
    }
}

fn open_builder(backend: &dyn FormBackend, form_id: u64, settings: &Settings) -> Result<FormBuilder, BuilderError> {
    let builder = FormBuilder::load(backend, form_id)?;
    Ok(match &settings.activity_log {
        Some(path) => builder.with_activity_log(ActivityLogger::new(path)),
        None => builder,
    })
}

fn drop_target(above: Option<&str>, below: Option<&str>) -> Option<DropTarget> {
    match (above, below) {
        (Some(id), _) => Some(DropTarget::top(id)),
        (None, Some(id)) => Some(DropTarget::bottom(id)),
        (None, None) => None,
    }
}

fn save_message(outcome: SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::Saved => "saved",
        SaveOutcome::Unchanged => "no changes to save",
    }
}

// ============================================================================
// Commands
// ============================================================================

pub fn cmd_new(backend: &mut dyn FormBackend, name: &str, description: &str) -> CmdResult<String> {
    let record = backend.create(name, description)?;
    Ok(format!("Created form {}: {}", record.id, record.name))
}

pub fn cmd_list(backend: &dyn FormBackend) -> CmdResult<String> {
    let forms = backend.list()?;
    if forms.is_empty() {
        return Ok("No forms yet".to_string());
    }

    let lines: Vec<String> = forms
        .iter()
        .map(|f| {
            format!(
                "{}\t{}\t{}\t{}",
                f.id,
                f.name,
                if f.published { "published" } else { "draft" },
                f.created_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn cmd_show(backend: &dyn FormBackend, form_id: u64, settings: &Settings) -> CmdResult<String> {
    let builder = open_builder(backend, form_id, settings)?;
    let form = builder.form();

    let mut out = format!(
        "=== Form {}: {} ({}) ===\n",
        form.id,
        form.name,
        if form.published { "published" } else { "draft" }
    );
    if builder.elements().is_empty() {
        out.push_str("(no elements)\n");
    }
    for (i, element) in builder.elements().iter().enumerate() {
        let attrs = element.attributes();
        out.push_str(&format!(
            "{:>3}. {} [{}]{}{}\n",
            i,
            element.id(),
            element.element_type(),
            attrs.label().map(|l| format!(" {}", l)).unwrap_or_default(),
            if attrs.required() { " *" } else { "" }
        ));
    }
    if let Some(link) = builder.share_link(&settings.base_url) {
        out.push_str(&format!("Share link: {}\n", link));
    }
    Ok(out)
}

pub fn cmd_add(
    backend: &mut dyn FormBackend,
    form_id: u64,
    element_type: ElementType,
    above: Option<&str>,
    below: Option<&str>,
    settings: &Settings,
) -> CmdResult<String> {
    let mut builder = open_builder(backend, form_id, settings)?;
    let id = builder.add_element(element_type, drop_target(above, below))?;
    builder.save(backend)?;
    info!(form_id, %id, %element_type, "element added");
    Ok(format!("Added {} {}", element_type, id))
}

pub fn cmd_move(
    backend: &mut dyn FormBackend,
    form_id: u64,
    element_id: &str,
    above: Option<&str>,
    below: Option<&str>,
    settings: &Settings,
) -> CmdResult<String> {
    let target = drop_target(above, below).ok_or("move needs --above or --below")?;
    let mut builder = open_builder(backend, form_id, settings)?;
    if !builder.move_element(element_id, target)? {
        return Ok(format!("{} already in place", element_id));
    }
    builder.save(backend)?;
    Ok(format!("Moved {}", element_id))
}

pub fn cmd_remove(backend: &mut dyn FormBackend, form_id: u64, element_id: &str, settings: &Settings) -> CmdResult<String> {
    let mut builder = open_builder(backend, form_id, settings)?;
    match builder.remove_element(element_id)? {
        Some(_) => {
            builder.save(backend)?;
            Ok(format!("Removed {}", element_id))
        }
        None => Ok(format!("{} not on the form, nothing removed", element_id)),
    }
}

pub fn cmd_set(
    backend: &mut dyn FormBackend,
    form_id: u64,
    element_id: &str,
    props: &[(String, String)],
    settings: &Settings,
) -> CmdResult<String> {
    let mut builder = open_builder(backend, form_id, settings)?;
    let element = builder
        .designer()
        .get(element_id)
        .ok_or_else(|| BuilderError::ElementNotFound(element_id.to_string()))?;
    let values = PropertyValues::parse(element, props)?;

    builder.apply_properties(element_id, &values)?;
    let outcome = builder.save(backend)?;
    Ok(format!("Updated {}: {}", element_id, save_message(outcome)))
}

pub fn cmd_save(backend: &mut dyn FormBackend, form_id: u64, from: &str, settings: &Settings) -> CmdResult<String> {
    let content = std::fs::read_to_string(from)?;
    let elements = parse_elements(&content)?;

    let mut builder = open_builder(backend, form_id, settings)?;
    builder.replace_elements(elements)?;
    let outcome = builder.save(backend)?;
    Ok(format!("Form {}: {}", form_id, save_message(outcome)))
}

pub fn cmd_publish(backend: &mut dyn FormBackend, form_id: u64, settings: &Settings) -> CmdResult<String> {
    let mut builder = open_builder(backend, form_id, settings)?;
    builder.publish(backend)?;
    let link = builder
        .share_link(&settings.base_url)
        .ok_or("form was not published")?;
    Ok(format!("Published form {}\nShare link: {}", form_id, link))
}

pub fn cmd_render(
    backend: &dyn FormBackend,
    form_id: u64,
    view: RenderView,
    output: Option<&str>,
    settings: &Settings,
) -> CmdResult<String> {
    let builder = open_builder(backend, form_id, settings)?;
    let html = match view {
        RenderView::Designer => builder.render_html(&settings.base_url),
        RenderView::Preview => builder.render_preview(),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &html)?;
            Ok(format!("HTML written to: {}", path))
        }
        None => Ok(html),
    }
}

pub fn cmd_submit(backend: &mut dyn FormBackend, share_url: &str, fields: &[(String, String)]) -> CmdResult<String> {
    let payload = submit_form(backend, share_url, fields)?;
    Ok(format!("Submitted {} field(s)", payload.len()))
}

pub fn cmd_submissions(backend: &dyn FormBackend, form_id: u64) -> CmdResult<String> {
    let record = backend.load(form_id)?;
    let elements = parse_elements(&record.content).map_err(|source| BuilderError::MalformedContent {
        form_id,
        source,
    })?;
    let submissions = backend.submissions(form_id)?;
    Ok(format_console_table(&SubmissionTable::build(&elements, &submissions)))
}
