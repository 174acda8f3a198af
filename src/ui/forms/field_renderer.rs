//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Height of a single-line bordered field
pub const FIELD_HEIGHT: u16 = 3;
/// Height of a multiline bordered field
pub const MULTILINE_FIELD_HEIGHT: u16 = 6;

fn focus_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Rows a field occupies
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        MULTILINE_FIELD_HEIGHT
    } else {
        FIELD_HEIGHT
    }
}

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    draw_text_box(
        frame,
        area,
        &field.label,
        &field.display_value(),
        is_active,
        field.is_multiline,
    );
}

/// Draw a bordered text box titled `label`
pub fn draw_text_box(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let cursor = if is_active { CURSOR } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, focus_style(is_active)),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a one-line checkbox: `[x] label`
pub fn draw_checkbox(frame: &mut Frame, area: Rect, label: &str, checked: bool, is_active: bool) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mut style = focus_style(is_active);
    if checked {
        style = style.add_modifier(Modifier::BOLD);
    }
    let pointer = if is_active { "▸ " } else { "  " };
    let line = Line::from(vec![
        Span::styled(pointer, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{mark} {label}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a bordered choice between options, highlighting `selected`
pub fn draw_choice(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    options: &[&str],
    selected: usize,
    is_active: bool,
) {
    let mut spans = Vec::new();
    for (idx, option) in options.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let (mark, style) = if idx == selected {
            ("(•)", focus_style(is_active).add_modifier(Modifier::BOLD))
        } else {
            ("( )", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{mark} {option}"), style));
    }

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_height() {
        assert_eq!(field_height(&FormField::text("a", "A", false)), FIELD_HEIGHT);
        assert_eq!(
            field_height(&FormField::text("b", "B", true)),
            MULTILINE_FIELD_HEIGHT
        );
    }
}
