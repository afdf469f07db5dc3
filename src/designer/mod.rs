pub mod canvas;
pub mod designer_state;
pub mod drag;
pub mod ids;
