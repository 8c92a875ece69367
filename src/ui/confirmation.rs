//! Confirmation screen shown after a successful submission

use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the post-submission panel, centered in the form body area
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let record = state.record_id.as_deref().unwrap_or("(pending)");

    let content = vec![
        Line::from(Span::styled(
            "✓ Registration complete",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your intake form has been submitted to the clinic."),
        Line::from(vec![
            Span::raw("Reference ID: "),
            Span::styled(record.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(":new form  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(":quit"),
        ]),
    ];

    // Center the panel
    let panel_width = area.width.min(58);
    let panel_height = (content.len() as u16 + 2).min(area.height);
    let panel = Rect {
        x: area.x + area.width.saturating_sub(panel_width) / 2,
        y: area.y + area.height.saturating_sub(panel_height) / 2,
        width: panel_width,
        height: panel_height,
    };

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(dialog, panel);
}

#[cfg(test)]
mod confirmation_tests {
    use super::*;
    use crate::state::constants::DEFAULT_DATE_FORMAT;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_shows_record_id() {
        let mut state = AppState::new(DEFAULT_DATE_FORMAT);
        state.record_id = Some("9f8e7d6c".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| draw(frame, frame.area(), &state))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Registration complete"));
        assert!(text.contains("9f8e7d6c"));
    }

    #[test]
    fn test_draw_without_record_id_shows_placeholder() {
        let state = AppState::new(DEFAULT_DATE_FORMAT);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| draw(frame, frame.area(), &state))
            .unwrap();

        assert!(buffer_text(&terminal).contains("(pending)"));
    }
}
