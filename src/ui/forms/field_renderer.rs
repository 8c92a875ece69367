//! Field rendering dispatch
//!
//! [`render_field`] turns one field spec plus its live binding into a
//! [`FieldWidget`], the plain description of what should appear. Dispatch
//! is an exhaustive match over the field kind, so adding a kind refuses to
//! compile until it renders. Nothing here touches the terminal; the
//! container in `field_container` paints the description.

use crate::state::constants::{DEFAULT_COUNTRY_CODE, DEFAULT_DATE_FORMAT};
use crate::state::forms::{Binding, FieldKind, FieldSpec, FieldValue, FieldWidget};

/// Decide what to draw for a single field
pub fn render_field(spec: &FieldSpec, binding: &mut Binding) -> FieldWidget {
    match &spec.kind {
        FieldKind::Input => FieldWidget::Text {
            text: bound_text(binding),
            placeholder: spec.placeholder.clone(),
            icon: spec.icon,
        },
        FieldKind::PhoneInput => FieldWidget::Phone {
            text: bound_text(binding),
            placeholder: spec.placeholder.clone(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        },
        // Reserved: no standalone checkbox body is defined yet, so the arm
        // renders nothing rather than failing dispatch.
        FieldKind::Checkbox => FieldWidget::Empty,
        FieldKind::DatePicker => FieldWidget::Date {
            text: bound_text(binding),
            format: spec
                .date_format
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        },
        FieldKind::Select(options) => {
            let selected = binding
                .value()
                .and_then(FieldValue::as_choice)
                .and_then(|value| options.iter().position(|option| option.value == value));
            FieldWidget::Select {
                options: options.clone(),
                selected,
                placeholder: spec.placeholder.clone(),
            }
        }
        FieldKind::Skeleton(body) => body(binding),
        FieldKind::Textarea => FieldWidget::Textarea {
            lines: bound_text(binding)
                .split('\n')
                .map(str::to_string)
                .collect(),
            placeholder: spec.placeholder.clone(),
        },
    }
}

fn bound_text(binding: &Binding) -> String {
    binding
        .value()
        .map(FieldValue::as_text)
        .unwrap_or("")
        .to_string()
}
