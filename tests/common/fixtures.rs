use form_builder::{
    designer::designer_state::DesignerState,
    element::{
        element_model::{ElementType, FormElementInstance},
        properties::{PropertyValues, apply_properties},
        registry::construct,
    },
    storage::{backend::FormBackend, file_backend::FileBackend, form_model::FormRecord},
};
use tempfile::TempDir;

pub fn element(element_type: ElementType, id: &str) -> FormElementInstance {
    construct(element_type, id)
}

pub fn text(id: &str) -> FormElementInstance {
    construct(ElementType::TextField, id)
}

/// Same element with `required` switched on.
pub fn required(instance: FormElementInstance) -> FormElementInstance {
    apply_properties(&instance, &PropertyValues::new().with("required", true)).unwrap()
}

/// Store holding one text field per id, in order.
pub fn store(ids: &[&str]) -> DesignerState {
    DesignerState::with_elements(ids.iter().map(|id| text(id)).collect()).unwrap()
}

pub fn ids(elements: &[FormElementInstance]) -> Vec<&str> {
    elements.iter().map(|e| e.id()).collect()
}

pub fn temp_backend() -> (TempDir, FileBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::open(dir.path()).unwrap();
    (dir, backend)
}

/// Create a form whose content is the given element list.
pub fn form_with(backend: &mut FileBackend, elements: &[FormElementInstance]) -> FormRecord {
    let record = backend.create("Contact", "Contact form").unwrap();
    let content = serde_json::to_string(elements).unwrap();
    backend.save_content(record.id, &content).unwrap();
    backend.load(record.id).unwrap()
}
