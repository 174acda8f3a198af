//! Login form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::state::LoginForm;
use crate::ui::components::{centered_rect, render_button_row, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const CARD_WIDTH: u16 = 54;

pub fn draw_login(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let card = centered_rect(area, CARD_WIDTH, FIELD_HEIGHT * 2 + BUTTON_HEIGHT + 4);

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Email or phone
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    draw_field(frame, chunks[0], &form.identifier, form.active_field_index == 0);
    draw_field(frame, chunks[1], &form.password, form.active_field_index == 1);

    render_button_row(
        frame,
        chunks[2],
        &[("Login", true, Some(Color::Green)), ("Register", true, None)],
        form.is_buttons_row_active(),
        form.selected_button,
    );
}
