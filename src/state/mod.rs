//! Application state module

mod app_state;
pub mod constants;
pub mod forms;

pub use app_state::*;
