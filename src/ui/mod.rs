//! UI module for rendering the TUI

mod confirmation;
pub mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    match app.state.view {
        View::Form => {
            let (rail_area, header_area, body_area) = layout::create_layout(frame.area());
            layout::draw_header(frame, header_area);
            layout::draw_section_rail(frame, rail_area, &app.state.registration);
            forms::draw_registration(frame, body_area, &mut app.state.registration);
        }
        View::Confirmation => {
            let content_area = layout::create_full_layout(frame.area());
            confirmation::draw(frame, content_area, &app.state);
        }
    }

    layout::draw_status_bar(frame, app);
}
