pub mod backend;
pub mod file_backend;
pub mod form_model;
pub mod http_backend;
