//! Survey form rendering
//!
//! The survey is taller than most terminals, so rows are laid out manually
//! and scrolled to keep the focused row visible.

use super::field_renderer::{draw_checkbox, draw_field, draw_text_box, field_height, FIELD_HEIGHT};
use crate::state::{AiModel, FormField, SurveyFocus, SurveyForm};
use crate::ui::components::{render_button_row, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    ModelsHeading,
    Focus(SurveyFocus),
}

fn build_rows(form: &SurveyForm) -> Vec<Row> {
    let mut rows = Vec::new();
    for focus in form.focus_order() {
        if focus == SurveyFocus::Model(AiModel::ALL[0]) {
            rows.push(Row::ModelsHeading);
        }
        rows.push(Row::Focus(focus));
    }
    rows
}

fn row_field(form: &SurveyForm, row: Row) -> Option<&FormField> {
    match row {
        Row::Focus(SurveyFocus::Name) => Some(&form.name),
        Row::Focus(SurveyFocus::BirthDate) => Some(&form.birth_date),
        Row::Focus(SurveyFocus::Education) => Some(&form.education),
        Row::Focus(SurveyFocus::City) => Some(&form.city),
        Row::Focus(SurveyFocus::Gender) => Some(&form.gender),
        Row::Focus(SurveyFocus::UseCase) => Some(&form.use_case),
        _ => None,
    }
}

fn row_height(form: &SurveyForm, row: Row) -> u16 {
    match row {
        Row::ModelsHeading | Row::Focus(SurveyFocus::Model(_)) => 1,
        Row::Focus(SurveyFocus::Reason(_)) => FIELD_HEIGHT,
        Row::Focus(SurveyFocus::Buttons) => BUTTON_HEIGHT,
        Row::Focus(_) => row_field(form, row).map_or(FIELD_HEIGHT, field_height),
    }
}

/// Range of rows to draw so that `focus` is visible within `available`
/// lines. Scrolls only as far as needed to reveal the focused row.
pub fn visible_rows(heights: &[u16], focus: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let focus = focus.min(heights.len() - 1);
    let available = u32::from(available);

    let mut start = 0;
    let mut used: u32 = heights[..=focus].iter().map(|h| u32::from(*h)).sum();
    while used > available && start < focus {
        used -= u32::from(heights[start]);
        start += 1;
    }

    let mut end = focus + 1;
    while end < heights.len() && used + u32::from(heights[end]) <= available {
        used += u32::from(heights[end]);
        end += 1;
    }
    start..end
}

pub fn draw_survey(
    frame: &mut Frame,
    area: Rect,
    form: &SurveyForm,
    ready: bool,
    safe: bool,
    submitting: bool,
) {
    let block = Block::default()
        .title(format!(" AI Survey - {} ", form.user))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Notice
            Constraint::Min(0),    // Rows
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_notice(frame, chunks[0], ready, safe, submitting);

    let rows = build_rows(form);
    let heights: Vec<u16> = rows.iter().map(|r| row_height(form, *r)).collect();
    let focus_index = rows
        .iter()
        .position(|r| *r == Row::Focus(form.focus))
        .unwrap_or(0);

    let body = chunks[1];
    let mut y = body.y;
    for idx in visible_rows(&heights, focus_index, body.height) {
        let height = heights[idx].min(body.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let area = Rect::new(body.x, y, body.width, height);
        draw_row(frame, area, form, rows[idx], ready && safe && !submitting);
        y += height;
    }
}

fn draw_notice(frame: &mut Frame, area: Rect, ready: bool, safe: bool, submitting: bool) {
    let line = if submitting {
        Line::from(Span::styled(
            "Submitting survey...",
            Style::default().fg(Color::Yellow),
        ))
    } else if !safe {
        Line::from(Span::styled(
            "Answers contain characters or phrases that are not allowed.",
            Style::default().fg(Color::Red),
        ))
    } else if ready {
        Line::from(Span::styled(
            "All fields complete. Press Ctrl+S or Send.",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            "Please fill in all fields before sending.",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_row(frame: &mut Frame, area: Rect, form: &SurveyForm, row: Row, can_send: bool) {
    let is_active = |focus: SurveyFocus| form.focus == focus;

    match row {
        Row::ModelsHeading => {
            let heading = Paragraph::new(Line::from(vec![
                Span::styled(
                    "AI models you have used",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(" (Space to toggle)", Style::default().fg(Color::DarkGray)),
            ]));
            frame.render_widget(heading, area);
        }
        Row::Focus(focus @ SurveyFocus::Model(model)) => {
            draw_checkbox(
                frame,
                area,
                model.label(),
                form.models.is_selected(model),
                is_active(focus),
            );
        }
        Row::Focus(focus @ SurveyFocus::Reason(model)) => {
            draw_text_box(
                frame,
                area,
                &format!("Cons of {}", model.label()),
                form.models.reason(model).unwrap_or_default(),
                is_active(focus),
                false,
            );
        }
        Row::Focus(SurveyFocus::Buttons) => {
            render_button_row(
                frame,
                area,
                &[("Send", can_send, Some(Color::Green)), ("Log out", true, None)],
                form.is_buttons_row_active(),
                form.selected_button,
            );
        }
        Row::Focus(focus) => {
            if let Some(field) = row_field(form, row) {
                draw_field(frame, area, field, is_active(focus));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_rows(&[3, 3, 3], 2, 20), 0..3);
        }

        #[test]
        fn test_fills_below_focus() {
            assert_eq!(visible_rows(&[3, 3, 3, 3], 0, 7), 0..2);
        }

        #[test]
        fn test_scrolls_to_reveal_focus() {
            assert_eq!(visible_rows(&[3, 3, 3, 3], 3, 7), 2..4);
        }

        #[test]
        fn test_focus_taller_than_view_is_still_shown() {
            assert_eq!(visible_rows(&[3, 10, 3], 1, 4), 1..2);
        }

        #[test]
        fn test_empty_and_out_of_range() {
            assert_eq!(visible_rows(&[], 0, 10), 0..0);
            assert_eq!(visible_rows(&[1, 1], 9, 10), 0..2);
        }
    }

    mod rows {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_heading_precedes_models() {
            let rows = build_rows(&SurveyForm::new("u"));
            let heading = rows.iter().position(|r| *r == Row::ModelsHeading).unwrap();
            assert_eq!(
                rows[heading + 1],
                Row::Focus(SurveyFocus::Model(AiModel::ALL[0]))
            );
        }

        #[test]
        fn test_reason_rows_follow_selection() {
            let mut form = SurveyForm::new("u");
            assert!(!build_rows(&form)
                .iter()
                .any(|r| matches!(r, Row::Focus(SurveyFocus::Reason(_)))));

            form.toggle_model(AiModel::Bard);
            assert!(build_rows(&form).contains(&Row::Focus(SurveyFocus::Reason(AiModel::Bard))));
        }

        #[test]
        fn test_use_case_row_is_tall() {
            let form = SurveyForm::new("u");
            assert!(
                row_height(&form, Row::Focus(SurveyFocus::UseCase))
                    > row_height(&form, Row::Focus(SurveyFocus::Name))
            );
        }
    }
}
