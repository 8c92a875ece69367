//! Form domain layer
//!
//! Declarative field specs over a shared name-keyed value store. The
//! renderer in `ui::forms` consumes these types; nothing in here touches
//! the terminal beyond describing what should appear.

mod context;
mod field;
mod form_state;
mod register;
mod spec;

pub use context::Binding;
pub use field::{normalize_phone, FieldValue, FileHandle};
pub use form_state::FormState;
pub use register::{FormRow, FormSection, RegistrationForm};
pub use spec::{human_date_format, FieldKind, FieldSpec, FieldWidget, SelectOption, SkeletonFn};
