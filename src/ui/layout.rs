//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the content area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Session indicator
    let session = match &app.state.logged_in_user {
        Some(user) => Span::styled(format!(" ● {user} "), Style::default().fg(Color::Green)),
        None => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
    };
    spans.push(session);
    spans.push(Span::styled(
        format!("{}  ", app.state.current_view.title()),
        Style::default().fg(Color::White),
    ));

    spans.push(Span::styled(
        get_view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if app.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Sending…", Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Login => format!("Tab:next  Enter:select  {SUBMIT_SHORTCUT}:login"),
        View::Register => {
            format!("Tab:next  Space:email/phone  {SUBMIT_SHORTCUT}:register  Esc:back")
        }
        View::Survey => {
            format!("Tab:next  Space:toggle  {SUBMIT_SHORTCUT}:send  Esc:log out")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_status_line() {
        let (content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content.height, 23);
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_every_view_has_hints() {
        for view in [View::Login, View::Register, View::Survey] {
            assert!(get_view_hints(view).contains(SUBMIT_SHORTCUT));
        }
    }
}
