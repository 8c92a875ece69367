//! Application state and core logic

use crate::config::IntakeConfig;
use crate::registry::{NewRegistration, RegistryClient, RegistryClientTrait};
use crate::state::constants::{DOCUMENT_FIELD, GENDER_FIELD};
use crate::state::forms::Binding;
use crate::state::{AppState, View};
use crate::ui::forms::apply_key;
use crate::validation::{RegistrationRules, Validator};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded configuration, kept for form resets and submission defaults
    pub config: IntakeConfig,
    /// Client for the clinic's patient registry
    client: Box<dyn RegistryClientTrait>,
    /// Rules every submission must pass
    validator: Box<dyn Validator>,
    /// Stable id for this installation, sent with every registration
    user_id: String,
}

impl App {
    /// Create a new App instance
    pub fn new(mut config: IntakeConfig) -> Result<Self> {
        let client = RegistryClient::from_config(&config);
        let validator = RegistrationRules::new(&config)?;

        // First run mints a user id and persists it for later sessions
        let user_id = match config.user_id.clone() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                config.user_id = Some(id.clone());
                if let Err(error) = config.save() {
                    tracing::warn!(%error, "could not persist generated user id");
                }
                id
            }
        };

        Ok(Self {
            state: AppState::new(&config.date_format),
            config,
            client: Box::new(client),
            validator: Box::new(validator),
            user_id,
        })
    }

    #[cfg(test)]
    fn with_client(config: IntakeConfig, client: Box<dyn RegistryClientTrait>) -> Self {
        let validator = RegistrationRules::new(&config).unwrap();
        Self {
            state: AppState::new(&config.date_format),
            config,
            client,
            validator: Box::new(validator),
            user_id: "test-user".to_string(),
        }
    }

    /// Ask the registry whether it is reachable and record the answer
    pub async fn check_registry(&mut self) {
        self.state.registry_connected = self.client.check_connection().await;
        if !self.state.registry_connected {
            tracing::warn!("patient registry is not reachable");
        }
    }

    /// Handle a key event for the current view
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.view {
            View::Form => self.handle_form_key(key).await?,
            View::Confirmation => self.handle_confirmation_key(key),
        }
        Ok(())
    }

    /// True when focus sits on the identification document field
    fn on_document_field(&self) -> bool {
        self.state
            .registration
            .active_spec()
            .map(|spec| spec.name == DOCUMENT_FIELD)
            .unwrap_or(false)
    }

    /// True when focus sits on the gender radio
    fn on_gender_field(&self) -> bool {
        self.state
            .registration
            .active_spec()
            .map(|spec| spec.name == GENDER_FIELD)
            .unwrap_or(false)
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_document = self.on_document_field();
        let on_gender = self.on_gender_field();

        match key.code {
            // Submit shortcut works from any field
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit().await;
            }
            // Clear the typed attachment path
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.registration.file_entry.clear();
            }
            // Any other chord stays out of the field editors
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Esc => self.state.registration.clear_feedback(),
            KeyCode::Tab | KeyCode::Down => {
                let form = &mut self.state.registration;
                form.next_field();
                form.ensure_active_visible();
            }
            KeyCode::BackTab | KeyCode::Up => {
                let form = &mut self.state.registration;
                form.prev_field();
                form.ensure_active_visible();
            }
            KeyCode::Enter if self.state.registration.on_submit_row() => {
                self.submit().await;
            }
            // The document field edits a path buffer instead of field text
            KeyCode::Enter if on_document => self.state.registration.attach_typed_path(),
            KeyCode::Char(c) if on_document => self.state.registration.file_entry.push(c),
            KeyCode::Backspace if on_document => {
                self.state.registration.file_entry.pop();
            }
            // Arrow keys move the gender radio selection
            KeyCode::Left if on_gender => self.state.registration.cycle_gender(false),
            KeyCode::Right if on_gender => self.state.registration.cycle_gender(true),
            _ => {
                let form = &mut self.state.registration;
                if let Some(spec) = form.specs.get(form.active) {
                    let mut binding = Binding::new(&spec.name, &mut form.state);
                    apply_key(spec, &mut binding, key);
                }
            }
        }
        Ok(())
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.state.start_new_form(&self.config.date_format);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.state.quit(),
            _ => {}
        }
    }

    /// Validate the form and send it to the registry.
    /// On success the app switches to the confirmation view.
    pub async fn submit(&mut self) {
        if self.state.registration.submitting {
            return;
        }

        let errors = self.validator.validate(&self.state.registration.state);
        if !errors.is_empty() {
            let count = errors.len();
            let form = &mut self.state.registration;
            form.state.set_errors(errors);
            form.status_message = Some(format!("{count} field(s) need attention"));
            return;
        }

        let registration = match NewRegistration::from_form(
            &self.state.registration.state,
            &self.user_id,
            &self.config,
        ) {
            Ok(registration) => registration,
            Err(error) => {
                tracing::error!(%error, "could not assemble registration");
                self.state.registration.status_message =
                    Some(format!("Could not prepare submission: {error}"));
                return;
            }
        };

        self.state.registration.submitting = true;
        self.state.registration.status_message = Some("Submitting registration...".to_string());

        match self.client.register_patient(registration).await {
            Ok(receipt) => {
                tracing::info!(record = %receipt.id, "registration stored");
                let form = &mut self.state.registration;
                form.submitting = false;
                form.status_message = None;
                self.state.record_id = Some(receipt.id.to_string());
                self.state.view = View::Confirmation;
            }
            Err(error) => {
                tracing::error!(%error, "registration failed");
                let form = &mut self.state.registration;
                form.submitting = false;
                form.status_message = Some(format!("Submission failed: {error}"));
            }
        }
    }
}
