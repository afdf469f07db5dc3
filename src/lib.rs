//! Drag-and-drop form builder: an element registry, a designer store driven
//! by drag gestures, validation of filled-in forms, and pluggable storage.

pub mod builder;
pub mod cli;
pub mod designer;
pub mod element;
pub mod error;
pub mod fields;
pub mod logging;
pub mod storage;
pub mod submit;
pub mod trace;
