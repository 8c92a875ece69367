//! Layout components (header, section rail, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::constants::DOCUMENT_FIELD;
use crate::state::forms::{FieldKind, FieldValue, RegistrationForm};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows reserved for the clinic header
pub const HEADER_HEIGHT: u16 = 3;
/// Columns reserved for the section rail
const RAIL_WIDTH: u16 = 22;

/// Create the form layout: section rail on the left, header and form body
/// on the right
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(RAIL_WIDTH), // Section rail
            Constraint::Min(0),             // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Title
            Constraint::Min(0),                // Form body
            Constraint::Length(1),             // Status bar
        ])
        .split(chunks[1]);

    let rail_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Rail content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (rail_chunks[0], main_chunks[0], main_chunks[1])
}

/// Create full-width layout without the rail (confirmation screen)
pub fn create_full_layout(area: Rect) -> Rect {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the clinic header above the form
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Patient Intake",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Let us know more about yourself.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the section rail with the current section highlighted
pub fn draw_section_rail(frame: &mut Frame, area: Rect, form: &RegistrationForm) {
    let current = form.active_section();

    let mut lines = vec![Line::from("")];
    for (index, section) in form.sections.iter().enumerate() {
        let (marker, style) = if current == Some(index) {
            (
                "▸",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (" ", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {}", section.title),
            style,
        )));
        lines.push(Line::from(""));
    }

    let rail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(rail, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Registry connection status
    let conn_status = if app.state.registry_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    match app.state.view {
        View::Form => {
            let form = &app.state.registration;
            if let Some(msg) = &form.status_message {
                // Feedback wins over key hints until the next edit
                let color = if form.state.has_errors() {
                    Color::Red
                } else {
                    Color::Yellow
                };
                spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
            } else {
                spans.extend(form_status_spans(form));
            }
        }
        View::Confirmation => {
            spans.push(Span::styled(
                "n:new form  q:quit",
                Style::default().fg(Color::Gray),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Status spans while no feedback message is pending
fn form_status_spans(form: &RegistrationForm) -> Vec<Span<'_>> {
    // The attachment field types into a path buffer shown down here
    let on_document = form
        .active_spec()
        .map(|spec| spec.name == DOCUMENT_FIELD)
        .unwrap_or(false);
    if on_document {
        return vec![
            Span::styled("Path: ", Style::default().fg(Color::Gray)),
            Span::styled(form.file_entry.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
            Span::styled("  Enter:attach  ^U:clear", Style::default().fg(Color::Gray)),
        ];
    }
    vec![Span::styled(
        form_hints(form),
        Style::default().fg(Color::Gray),
    )]
}

/// Get keyboard hints for the focused form row
fn form_hints(form: &RegistrationForm) -> String {
    if form.on_submit_row() {
        return "Enter:submit  Shift+Tab:back".to_string();
    }

    let Some(spec) = form.active_spec() else {
        return format!("Tab:next  Shift+Tab:prev  {SUBMIT_SHORTCUT}:submit");
    };

    match spec.kind {
        FieldKind::Select(_) => format!("←/→:choose  Tab:next  {SUBMIT_SHORTCUT}:submit"),
        FieldKind::Skeleton(_) => {
            // Radio skeletons store a choice, consent toggles store a flag
            if matches!(form.state.value(&spec.name), Some(FieldValue::Choice(_))) {
                format!("←/→:choose  Tab:next  {SUBMIT_SHORTCUT}:submit")
            } else {
                format!("Space:toggle  Tab:next  {SUBMIT_SHORTCUT}:submit")
            }
        }
        _ => format!("Tab:next  Shift+Tab:prev  {SUBMIT_SHORTCUT}:submit"),
    }
}
