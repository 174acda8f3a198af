//! Register form rendering

use super::field_renderer::{draw_choice, draw_field, FIELD_HEIGHT};
use crate::state::{ContactMethod, RegisterForm};
use crate::ui::components::{centered_rect, render_button_row, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const CARD_WIDTH: u16 = 54;

pub fn draw_register(frame: &mut Frame, area: Rect, form: &RegisterForm) {
    let card = centered_rect(area, CARD_WIDTH, FIELD_HEIGHT * 4 + BUTTON_HEIGHT + 4);

    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Method
            Constraint::Length(FIELD_HEIGHT),  // Email / phone
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(FIELD_HEIGHT),  // Confirm
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let selected_method = match form.method {
        ContactMethod::Email => 0,
        ContactMethod::Phone => 1,
    };
    draw_choice(
        frame,
        chunks[0],
        "Register with (Space)",
        &[ContactMethod::Email.label(), ContactMethod::Phone.label()],
        selected_method,
        form.is_method_row_active(),
    );
    draw_field(frame, chunks[1], form.contact(), form.active_field_index == 1);
    draw_field(frame, chunks[2], &form.password, form.active_field_index == 2);
    draw_field(frame, chunks[3], &form.confirm, form.active_field_index == 3);

    render_button_row(
        frame,
        chunks[4],
        &[("Register", true, Some(Color::Green)), ("Back", true, None)],
        form.is_buttons_row_active(),
        form.selected_button,
    );
}
