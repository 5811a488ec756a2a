//! UI components.

pub mod ambient_field;
