//! Registration form screen
//!
//! Lays the intake form out as a scrolling column of section headings,
//! fields, and the submit row, with a scrollbar when the form is taller
//! than the viewport.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::forms::{FormRow, FormSection, RegistrationForm};

use super::field_container::draw_field;

pub fn draw_registration(frame: &mut Frame, area: Rect, form: &mut RegistrationForm) {
    let content_height = form.content_height();
    let (body, track) = if content_height > area.height {
        let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(1)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    // The key handler scrolls against whatever the last frame showed.
    form.viewport = body.height;

    let rows = form.rows();
    let visible = form.visible_rows(body.height);
    let constraints: Vec<Constraint> = rows[visible.clone()]
        .iter()
        .map(|row| Constraint::Length(form.row_height(*row)))
        .collect();
    let chunks = Layout::vertical(constraints).split(body);

    for (chunk, row) in chunks.iter().zip(&rows[visible]) {
        match *row {
            FormRow::Section(index) => {
                draw_section_heading(frame, *chunk, &form.sections[index]);
            }
            FormRow::Field(index) => {
                let focused = index == form.active;
                draw_field(frame, *chunk, &form.specs[index], &mut form.state, focused);
            }
            FormRow::Submit => draw_submit_row(frame, *chunk, form),
        }
    }

    if let Some(track) = track {
        draw_scrollbar(frame, track, content_height, form.offset_height());
    }
}

fn draw_section_heading(frame: &mut Frame, area: Rect, section: &FormSection) {
    let line = Line::from(Span::styled(
        section.title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_submit_row(frame: &mut Frame, area: Rect, form: &RegistrationForm) {
    let focused = form.on_submit_row();
    let label = if form.submitting {
        "Submitting..."
    } else {
        "Submit and Register"
    };
    let label_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(Span::styled(label, label_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(button, area);
}

fn draw_scrollbar(frame: &mut Frame, track: Rect, content_height: u16, offset_height: u16) {
    let Some((start, len)) = scrollbar_thumb(content_height, offset_height, track.height) else {
        return;
    };
    let lines: Vec<Line> = (0..track.height)
        .map(|y| {
            if y >= start && y < start + len {
                Line::from(Span::styled("█", Style::default().fg(Color::Cyan)))
            } else {
                Line::from(Span::styled("│", Style::default().fg(Color::DarkGray)))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), track);
}

/// Thumb position and length on a scrollbar track, in rows. Returns None
/// when the content already fits the track.
fn scrollbar_thumb(content: u16, offset: u16, track: u16) -> Option<(u16, u16)> {
    if track == 0 || content <= track {
        return None;
    }
    let len = ((u32::from(track) * u32::from(track)) / u32::from(content)).max(1) as u16;
    let max_offset = content - track;
    let offset = offset.min(max_offset);
    let start = (u32::from(offset) * u32::from(track - len) + u32::from(max_offset) / 2)
        / u32::from(max_offset);
    Some((start as u16, len))
}
