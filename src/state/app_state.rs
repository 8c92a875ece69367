//! Application state definitions

use crate::state::forms::RegistrationForm;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The multi-section registration form
    #[default]
    Form,
    /// Post-submission screen showing the new record id
    Confirmation,
}

/// Main application state
pub struct AppState {
    pub view: View,
    pub registration: RegistrationForm,
    /// Record id returned by the registry for the last submission
    pub record_id: Option<String>,
    /// Whether the registry answered the startup connection check
    pub registry_connected: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(date_format: &str) -> Self {
        Self {
            view: View::Form,
            registration: RegistrationForm::new(date_format),
            record_id: None,
            registry_connected: false,
            should_quit: false,
        }
    }

    /// Swap in a fresh form after a completed submission
    pub fn start_new_form(&mut self, date_format: &str) {
        self.registration = RegistrationForm::new(date_format);
        self.record_id = None;
        self.view = View::Form;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
