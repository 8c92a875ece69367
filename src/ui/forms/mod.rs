//! Form rendering module
//!
//! This module contains UI components for rendering the intake form:
//! - `field_renderer`: kind-to-widget dispatch
//! - `field_container`: per-field chrome, drawing, and key editing
//! - `register_form`: the full registration screen

mod field_container;
mod field_renderer;
mod register_form;

pub use field_container::{apply_key, draw_field};
pub use field_renderer::render_field;
pub use register_form::draw_registration;
