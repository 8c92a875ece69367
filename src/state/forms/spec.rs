//! Field descriptors for the intake form
//!
//! A [`FieldSpec`] describes one field declaratively: what kind of control
//! it is, which name it binds to, and the presentation hints the renderer
//! needs. Specs carry no values; values live in the shared
//! [`FormState`](super::FormState) keyed by field name.

use std::fmt;

use ratatui::text::Line;

use super::context::Binding;
use super::field::FieldValue;

/// Caller-supplied field body. The closure receives the live binding so a
/// custom widget can read the current value and write updates back.
pub type SkeletonFn = Box<dyn Fn(&mut Binding) -> FieldWidget + Send + Sync>;

/// The kinds of field the renderer knows how to draw.
pub enum FieldKind {
    /// Single-line text entry with an optional icon and placeholder.
    Input,
    /// Phone entry, normalized to an international number on read-back.
    PhoneInput,
    /// Reserved: renders nothing. Consent toggles go through skeleton
    /// bodies today, so no standalone checkbox body is defined yet.
    Checkbox,
    /// Date entry, parsed against the configured format at validation time.
    DatePicker,
    /// One-of-N choice cycled with the left/right arrow keys.
    Select(Vec<SelectOption>),
    /// Caller-supplied body rendered through the stored closure.
    Skeleton(SkeletonFn),
    /// Multi-line text entry.
    Textarea,
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Input => write!(f, "Input"),
            FieldKind::PhoneInput => write!(f, "PhoneInput"),
            FieldKind::Checkbox => write!(f, "Checkbox"),
            FieldKind::DatePicker => write!(f, "DatePicker"),
            FieldKind::Select(options) => f.debug_tuple("Select").field(options).finish(),
            FieldKind::Skeleton(_) => write!(f, "Skeleton(..)"),
            FieldKind::Textarea => write!(f, "Textarea"),
        }
    }
}

/// One entry in a [`FieldKind::Select`] list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value stored in form state when this option is chosen.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// Option whose stored value and shown label are the same string.
    pub fn plain(text: &str) -> Self {
        Self::new(text, text)
    }
}

/// Declarative description of a single form field.
#[derive(Debug)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub icon: Option<&'static str>,
    pub date_format: Option<String>,
    pub initial: Option<FieldValue>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind, name: &str, label: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            icon: None,
            date_format: None,
            initial: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn date_format(mut self, format: &str) -> Self {
        self.date_format = Some(format.to_string());
        self
    }

    pub fn initial(mut self, value: FieldValue) -> Self {
        self.initial = Some(value);
        self
    }

    /// Starting value seeded for this field when it is first registered.
    pub fn seed_value(&self) -> FieldValue {
        if let Some(initial) = &self.initial {
            return initial.clone();
        }
        match &self.kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::DatePicker => FieldValue::Date(String::new()),
            FieldKind::Select(_) => FieldValue::Choice(None),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// What the renderer decided to draw for one field.
///
/// A plain description rather than a widget tree so dispatch can be
/// inspected and compared in tests before anything touches a terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Nothing at all, not even a border.
    Empty,
    Text {
        text: String,
        placeholder: String,
        icon: Option<&'static str>,
    },
    Phone {
        text: String,
        placeholder: String,
        /// Prefix assumed until the entry starts with its own `+`
        country_code: String,
    },
    Date {
        text: String,
        format: String,
    },
    Textarea {
        lines: Vec<String>,
        placeholder: String,
    },
    Select {
        options: Vec<SelectOption>,
        selected: Option<usize>,
        placeholder: String,
    },
    /// Pre-rendered lines from a skeleton body.
    Custom(Vec<Line<'static>>),
}

/// User-facing form of a chrono date format, for hint lines and messages
pub fn human_date_format(format: &str) -> String {
    format
        .replace("%Y", "YYYY")
        .replace("%y", "YY")
        .replace("%m", "MM")
        .replace("%d", "DD")
}
