//! Field container
//!
//! Owns everything around a field body: registering the field in form
//! state on first sight, deriving the per-field binding, drawing the
//! labelled box with focus styling, and the feedback line underneath.
//! Key handling for the focused field lives here too, so the per-kind
//! editing rules sit next to the per-kind drawing rules.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::forms::{
    human_date_format, Binding, FieldKind, FieldSpec, FieldValue, FieldWidget, FormState,
    SelectOption,
};

use super::field_renderer::render_field;

/// Draw one field: bordered box titled with the label, the rendered body
/// inside, and the validation error (if any) on the line below. Checkbox
/// fields render nothing, label included.
pub fn draw_field(frame: &mut Frame, area: Rect, spec: &FieldSpec, state: &mut FormState, focused: bool) {
    state.register(spec);

    let widget = {
        let mut binding = Binding::new(&spec.name, &mut *state);
        render_field(spec, &mut binding)
    };
    if matches!(widget, FieldWidget::Empty) {
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    let body = widget_paragraph(&widget, focused);
    frame.render_widget(body.wrap(Wrap { trim: false }).block(block), chunks[0]);

    if let Some(message) = state.error(&spec.name) {
        let line = Line::from(Span::styled(
            format!("✗ {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

/// Route a key press to the focused field. Returns whether the key was
/// consumed, so the caller can fall back to navigation handling.
pub fn apply_key(spec: &FieldSpec, binding: &mut Binding, key: KeyEvent) -> bool {
    match &spec.kind {
        FieldKind::Input => match key.code {
            KeyCode::Char(c) => {
                binding.push_char(c);
                true
            }
            KeyCode::Backspace => {
                binding.pop_char();
                true
            }
            _ => false,
        },
        FieldKind::PhoneInput => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || "+ ()-".contains(c) => {
                binding.push_char(c);
                true
            }
            KeyCode::Backspace => {
                binding.pop_char();
                true
            }
            _ => false,
        },
        FieldKind::Checkbox => false,
        FieldKind::DatePicker => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || "-/.".contains(c) => {
                binding.push_char(c);
                true
            }
            KeyCode::Backspace => {
                binding.pop_char();
                true
            }
            _ => false,
        },
        FieldKind::Select(options) => match key.code {
            KeyCode::Left => {
                cycle_select(options, binding, false);
                true
            }
            KeyCode::Right => {
                cycle_select(options, binding, true);
                true
            }
            _ => false,
        },
        FieldKind::Skeleton(_) => match key.code {
            // Flag-valued skeletons (the consent rows) toggle on Space.
            KeyCode::Char(' ') if matches!(binding.value(), Some(FieldValue::Flag(_))) => {
                if let Some(value) = binding.value_mut() {
                    value.toggle();
                }
                true
            }
            _ => false,
        },
        FieldKind::Textarea => match key.code {
            KeyCode::Char(c) => {
                binding.push_char(c);
                true
            }
            KeyCode::Enter => {
                binding.push_char('\n');
                true
            }
            KeyCode::Backspace => {
                binding.pop_char();
                true
            }
            _ => false,
        },
    }
}

/// Step the stored choice forward or backward, wrapping at either end.
/// With nothing chosen yet, stepping forward picks the first option and
/// stepping backward picks the last.
fn cycle_select(options: &[SelectOption], binding: &mut Binding, forward: bool) {
    if options.is_empty() {
        return;
    }
    let current = binding
        .value()
        .and_then(FieldValue::as_choice)
        .and_then(|value| options.iter().position(|option| option.value == value));
    let next = match current {
        Some(index) if forward => (index + 1) % options.len(),
        Some(index) => (index + options.len() - 1) % options.len(),
        None if forward => 0,
        None => options.len() - 1,
    };
    binding.set(FieldValue::Choice(Some(options[next].value.clone())));
}

fn widget_paragraph(widget: &FieldWidget, focused: bool) -> Paragraph<'static> {
    match widget {
        FieldWidget::Empty => Paragraph::new(Vec::<Line>::new()),
        FieldWidget::Text {
            text,
            placeholder,
            icon,
        } => Paragraph::new(entry_line(text, placeholder, *icon, focused)),
        FieldWidget::Phone {
            text,
            placeholder,
            country_code,
        } => Paragraph::new(phone_line(text, placeholder, country_code, focused)),
        FieldWidget::Date { text, format } => {
            Paragraph::new(entry_line(text, &human_date_format(format), None, focused))
        }
        FieldWidget::Textarea { lines, placeholder } => {
            Paragraph::new(textarea_lines(lines, placeholder, focused))
        }
        FieldWidget::Select {
            options,
            selected,
            placeholder,
        } => Paragraph::new(select_line(options, *selected, placeholder, focused)),
        FieldWidget::Custom(lines) => Paragraph::new(lines.clone()),
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn cursor_span() -> Span<'static> {
    Span::styled("▌", Style::default().fg(Color::Cyan))
}

fn entry_line(
    text: &str,
    placeholder: &str,
    icon: Option<&'static str>,
    focused: bool,
) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(icon) = icon {
        spans.push(Span::styled(
            format!("{icon} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if text.is_empty() {
        if focused {
            spans.push(cursor_span());
        }
        let hint = if placeholder.is_empty() {
            "(empty)"
        } else {
            placeholder
        };
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ));
    } else {
        spans.push(Span::styled(text.to_string(), value_style(focused)));
        if focused {
            spans.push(cursor_span());
        }
    }
    Line::from(spans)
}

/// Phone entries show the assumed country prefix until the user types
/// their own `+`.
fn phone_line(text: &str, placeholder: &str, country_code: &str, focused: bool) -> Line<'static> {
    let mut line = entry_line(text, placeholder, None, focused);
    if !text.starts_with('+') {
        line.spans.insert(
            0,
            Span::styled(
                format!("{country_code} "),
                Style::default().fg(Color::DarkGray),
            ),
        );
    }
    line
}

fn textarea_lines(lines: &[String], placeholder: &str, focused: bool) -> Vec<Line<'static>> {
    let empty = lines.iter().all(String::is_empty);
    if empty {
        return vec![entry_line("", placeholder, None, focused)];
    }
    let mut rendered: Vec<Line> = lines
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), value_style(focused))))
        .collect();
    if focused {
        if let Some(last) = rendered.last_mut() {
            last.spans.push(cursor_span());
        }
    }
    rendered
}

fn select_line(
    options: &[SelectOption],
    selected: Option<usize>,
    placeholder: &str,
    focused: bool,
) -> Line<'static> {
    let label = selected
        .and_then(|index| options.get(index))
        .map(|option| option.label.clone());
    let mut spans: Vec<Span> = Vec::new();
    if focused {
        spans.push(Span::styled("◄ ", Style::default().fg(Color::Cyan)));
    }
    match label {
        Some(label) => spans.push(Span::styled(label, value_style(focused))),
        None => spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )),
    }
    if focused {
        spans.push(Span::styled(" ►", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}
