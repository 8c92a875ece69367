//! Patient intake form
//!
//! The field list for the clinic's four-section registration form, plus
//! the focus and scroll state the form screen keeps between frames.

use std::ops::Range;
use std::path::Path;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::state::constants::{
    DOCTORS, DOCUMENT_FIELD, GENDER_FIELD, GENDER_OPTIONS, IDENTIFICATION_TYPES,
};

use super::field::{FieldValue, FileHandle};
use super::form_state::FormState;
use super::spec::{FieldKind, FieldSpec, FieldWidget, SelectOption, SkeletonFn};

/// Height of a section heading in terminal rows
pub const SECTION_HEADER_HEIGHT: u16 = 2;
/// Height of a regular field: bordered box plus one feedback line
pub const FIELD_HEIGHT: u16 = 4;
/// Height of a multi-line field: taller box plus one feedback line
pub const TEXTAREA_HEIGHT: u16 = 7;
/// Height of the submit button row
pub const SUBMIT_HEIGHT: u16 = 3;

/// Rows the form screen lays out, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// Section heading, indexing into [`RegistrationForm::sections`]
    Section(usize),
    /// Field row, indexing into [`RegistrationForm::specs`]
    Field(usize),
    /// The submit button row at the bottom
    Submit,
}

/// A titled run of consecutive fields
#[derive(Debug, Clone)]
pub struct FormSection {
    pub title: &'static str,
    pub fields: Range<usize>,
}

/// Everything the registration screen needs between frames
#[derive(Debug)]
pub struct RegistrationForm {
    pub sections: Vec<FormSection>,
    pub specs: Vec<FieldSpec>,
    pub state: FormState,
    /// Index into `specs`, or one past the end for the submit row
    pub active: usize,
    /// First visible row index into [`rows`](Self::rows)
    pub scroll_offset: usize,
    /// Viewport height in terminal rows, refreshed by the draw pass
    pub viewport: u16,
    /// Path being typed for the identification document attachment
    pub file_entry: String,
    pub submitting: bool,
    pub status_message: Option<String>,
}

impl RegistrationForm {
    pub fn new(date_format: &str) -> Self {
        let (sections, specs) = patient_intake_specs(date_format);
        let mut state = FormState::new();
        for spec in &specs {
            if !state.register(spec) {
                tracing::debug!(field = %spec.name, "duplicate field name in intake form");
            }
        }
        Self {
            sections,
            specs,
            state,
            active: 0,
            scroll_offset: 0,
            viewport: 0,
            file_entry: String::new(),
            submitting: false,
            status_message: None,
        }
    }

    /// Total focusable positions: every field plus the submit row
    pub fn position_count(&self) -> usize {
        self.specs.len() + 1
    }

    /// True when focus sits on the submit button row
    pub fn on_submit_row(&self) -> bool {
        self.active == self.specs.len()
    }

    pub fn active_spec(&self) -> Option<&FieldSpec> {
        self.specs.get(self.active)
    }

    /// Index of the section holding the focused field, if any
    pub fn active_section(&self) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.fields.contains(&self.active))
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.position_count();
    }

    pub fn prev_field(&mut self) {
        if self.active == 0 {
            self.active = self.position_count() - 1;
        } else {
            self.active -= 1;
        }
    }

    /// Display rows in order: each section heading followed by its fields,
    /// then the submit row
    pub fn rows(&self) -> Vec<FormRow> {
        let mut rows = Vec::with_capacity(self.specs.len() + self.sections.len() + 1);
        for (index, section) in self.sections.iter().enumerate() {
            rows.push(FormRow::Section(index));
            for field in section.fields.clone() {
                rows.push(FormRow::Field(field));
            }
        }
        rows.push(FormRow::Submit);
        rows
    }

    pub fn row_height(&self, row: FormRow) -> u16 {
        match row {
            FormRow::Section(_) => SECTION_HEADER_HEIGHT,
            FormRow::Field(index) => match self.specs[index].kind {
                FieldKind::Textarea => TEXTAREA_HEIGHT,
                _ => FIELD_HEIGHT,
            },
            FormRow::Submit => SUBMIT_HEIGHT,
        }
    }

    fn is_active_row(&self, row: FormRow) -> bool {
        match row {
            FormRow::Field(index) => index == self.active,
            FormRow::Submit => self.on_submit_row(),
            FormRow::Section(_) => false,
        }
    }

    fn rows_fit(&self, rows: &[FormRow], from: usize, through: usize, viewport: u16) -> bool {
        let mut used: u16 = 0;
        for row in &rows[from..=through] {
            used = used.saturating_add(self.row_height(*row));
        }
        used <= viewport
    }

    /// Scroll just far enough that the focused row sits fully on screen
    pub fn ensure_active_visible(&mut self) {
        let viewport = self.viewport;
        if viewport == 0 {
            return;
        }
        let rows = self.rows();
        let Some(active_row) = rows.iter().position(|row| self.is_active_row(*row)) else {
            return;
        };
        if active_row < self.scroll_offset {
            self.scroll_offset = active_row;
            return;
        }
        while self.scroll_offset < active_row
            && !self.rows_fit(&rows, self.scroll_offset, active_row, viewport)
        {
            self.scroll_offset += 1;
        }
    }

    /// Row range `[start, end)` to draw for the current scroll position.
    /// The last row may be clipped by the viewport edge.
    pub fn visible_rows(&self, viewport: u16) -> Range<usize> {
        let rows = self.rows();
        let start = self.scroll_offset.min(rows.len());
        let mut used: u16 = 0;
        let mut end = start;
        while end < rows.len() {
            used = used.saturating_add(self.row_height(rows[end]));
            end += 1;
            if used >= viewport {
                break;
            }
        }
        start..end
    }

    /// Total content height in terminal rows
    pub fn content_height(&self) -> u16 {
        self.rows()
            .iter()
            .map(|row| self.row_height(*row))
            .sum()
    }

    /// Height of the rows scrolled off the top
    pub fn offset_height(&self) -> u16 {
        let rows = self.rows();
        rows[..self.scroll_offset.min(rows.len())]
            .iter()
            .map(|row| self.row_height(*row))
            .sum()
    }

    /// Attach the typed path to the identification document field
    pub fn attach_typed_path(&mut self) {
        let path = self.file_entry.trim().to_string();
        if path.is_empty() {
            self.status_message = Some("Type a file path, then press Enter to attach".to_string());
            return;
        }
        if !Path::new(&path).is_file() {
            self.status_message = Some(format!("No such file: {path}"));
            return;
        }
        if let Some(FieldValue::Files(files)) = self.state.value_mut(DOCUMENT_FIELD) {
            files.push(FileHandle::from_path(path.as_str()));
            self.file_entry.clear();
            self.status_message = None;
        }
    }

    /// Move the gender radio to the next or previous option, wrapping at
    /// either end. An unset radio starts from the nearest end.
    pub fn cycle_gender(&mut self, forward: bool) {
        let current = self
            .state
            .choice(GENDER_FIELD)
            .and_then(|chosen| GENDER_OPTIONS.iter().position(|option| *option == chosen));
        let next = match current {
            Some(index) if forward => (index + 1) % GENDER_OPTIONS.len(),
            Some(index) => (index + GENDER_OPTIONS.len() - 1) % GENDER_OPTIONS.len(),
            None if forward => 0,
            None => GENDER_OPTIONS.len() - 1,
        };
        self.state.set_value(
            GENDER_FIELD,
            FieldValue::Choice(Some(GENDER_OPTIONS[next].to_string())),
        );
    }

    /// Drop validation errors and any status line after an Esc press
    pub fn clear_feedback(&mut self) {
        self.state.clear_errors();
        self.status_message = None;
    }
}

fn options_from(values: &[&str]) -> Vec<SelectOption> {
    values.iter().map(|value| SelectOption::plain(value)).collect()
}

fn gender_body() -> SkeletonFn {
    Box::new(|binding| {
        let chosen = binding
            .value()
            .and_then(FieldValue::as_choice)
            .unwrap_or("");
        let mut spans = Vec::new();
        for (index, option) in GENDER_OPTIONS.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("   "));
            }
            let (mark, style) = if chosen == *option {
                ("(•)", Style::default().fg(Color::Green))
            } else {
                ("( )", Style::default().fg(Color::DarkGray))
            };
            spans.push(Span::styled(mark, style));
            spans.push(Span::raw(format!(" {option}")));
        }
        FieldWidget::Custom(vec![Line::from(spans)])
    })
}

fn consent_body() -> SkeletonFn {
    Box::new(|binding| {
        let agreed = binding.value().map(FieldValue::as_flag).unwrap_or(false);
        let (mark, style) = if agreed {
            ("[x]", Style::default().fg(Color::Green))
        } else {
            ("[ ]", Style::default().fg(Color::DarkGray))
        };
        let caption = if agreed { "Agreed" } else { "Press Space to agree" };
        FieldWidget::Custom(vec![Line::from(vec![
            Span::styled(mark, style),
            Span::raw(" "),
            Span::raw(caption),
        ])])
    })
}

fn document_body() -> SkeletonFn {
    Box::new(|binding| {
        let files = match binding.value() {
            Some(FieldValue::Files(files)) if !files.is_empty() => files,
            _ => {
                return FieldWidget::Custom(vec![Line::from(Span::styled(
                    "No document attached. Type a path and press Enter.",
                    Style::default().fg(Color::DarkGray),
                ))]);
            }
        };
        FieldWidget::Custom(
            files
                .iter()
                .map(|file| Line::from(format!("• {} ({})", file.file_name, file.mime_type)))
                .collect(),
        )
    })
}

/// Field specs and sections for the clinic's registration form
pub fn patient_intake_specs(date_format: &str) -> (Vec<FormSection>, Vec<FieldSpec>) {
    let specs = vec![
        // Personal information
        FieldSpec::new(FieldKind::Input, "name", "Full name")
            .placeholder("John Doe")
            .icon("●"),
        FieldSpec::new(FieldKind::Input, "email", "Email address")
            .placeholder("johndoe@gmail.com")
            .icon("✉"),
        FieldSpec::new(FieldKind::PhoneInput, "phone", "Phone number")
            .placeholder("(555) 123-4567"),
        FieldSpec::new(FieldKind::DatePicker, "birth_date", "Date of birth")
            .date_format(date_format),
        FieldSpec::new(FieldKind::Skeleton(gender_body()), GENDER_FIELD, "Gender")
            .initial(FieldValue::Choice(None)),
        FieldSpec::new(FieldKind::Input, "address", "Address")
            .placeholder("14 Street, New York, NY - 5101"),
        FieldSpec::new(FieldKind::Input, "occupation", "Occupation")
            .placeholder("Software Engineer"),
        FieldSpec::new(
            FieldKind::Input,
            "emergency_contact_name",
            "Emergency contact name",
        )
        .placeholder("Guardian's name"),
        FieldSpec::new(
            FieldKind::PhoneInput,
            "emergency_contact_number",
            "Emergency contact number",
        )
        .placeholder("(555) 123-4567"),
        // Medical information
        FieldSpec::new(
            FieldKind::Select(options_from(DOCTORS)),
            "primary_physician",
            "Primary care physician",
        )
        .placeholder("Select a physician"),
        FieldSpec::new(FieldKind::Input, "insurance_provider", "Insurance provider")
            .placeholder("BlueCross BlueShield"),
        FieldSpec::new(
            FieldKind::Input,
            "insurance_policy_number",
            "Insurance policy number",
        )
        .placeholder("ABC123456789"),
        FieldSpec::new(FieldKind::Textarea, "allergies", "Allergies (if any)")
            .placeholder("Peanuts, Penicillin, Pollen"),
        FieldSpec::new(
            FieldKind::Textarea,
            "current_medication",
            "Current medications (if any)",
        )
        .placeholder("Ibuprofen 200mg, Levothyroxine 50mcg"),
        FieldSpec::new(
            FieldKind::Textarea,
            "family_medical_history",
            "Family medical history (if relevant)",
        )
        .placeholder("Mother had brain cancer, Father has hypertension"),
        FieldSpec::new(
            FieldKind::Textarea,
            "past_medical_history",
            "Past medical history",
        )
        .placeholder("Appendectomy in 2015, Asthma diagnosis in childhood"),
        // Identification and verification
        FieldSpec::new(
            FieldKind::Select(options_from(IDENTIFICATION_TYPES)),
            "identification_type",
            "Identification type",
        )
        .placeholder("Select identification type"),
        FieldSpec::new(
            FieldKind::Input,
            "identification_number",
            "Identification number",
        )
        .placeholder("123456789"),
        FieldSpec::new(
            FieldKind::Skeleton(document_body()),
            DOCUMENT_FIELD,
            "Scanned copy of identification document",
        )
        .initial(FieldValue::Files(Vec::new())),
        // Consent and privacy
        FieldSpec::new(
            FieldKind::Skeleton(consent_body()),
            "treatment_consent",
            "I consent to receive treatment for my health condition.",
        )
        .initial(FieldValue::Flag(false)),
        FieldSpec::new(
            FieldKind::Skeleton(consent_body()),
            "disclosure_consent",
            "I consent to the use and disclosure of my health information for treatment purposes.",
        )
        .initial(FieldValue::Flag(false)),
        FieldSpec::new(
            FieldKind::Skeleton(consent_body()),
            "privacy_consent",
            "I acknowledge that I have reviewed and agree to the privacy policy.",
        )
        .initial(FieldValue::Flag(false)),
    ];

    let sections = vec![
        FormSection {
            title: "Personal Information",
            fields: 0..9,
        },
        FormSection {
            title: "Medical Information",
            fields: 9..16,
        },
        FormSection {
            title: "Identification and Verification",
            fields: 16..19,
        },
        FormSection {
            title: "Consent and Privacy",
            fields: 19..22,
        },
    ];

    (sections, specs)
}
