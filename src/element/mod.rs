pub mod element_model;
pub mod html;
pub mod properties;
pub mod registry;
