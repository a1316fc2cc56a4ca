pub mod classify_types;
pub mod file_types;
pub mod widget_state;
