//! Layout rendering (header, mood input, key hints)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, QueryState, UiState};

pub const INPUT_PLACEHOLDER: &str = "Enter your mood (happy, sad, relax, or angry)...";

pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("moodify")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

pub fn render_mood_input(frame: &mut Frame, area: Rect, ui_state: &UiState, query: &QueryState) {
    let is_focused = ui_state.active_section == ActiveSection::Input;

    let (text, text_style) = if ui_state.mood_input.is_empty() {
        (INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (ui_state.mood_input.as_str(), Style::default().fg(Color::Green))
    } else {
        (ui_state.mood_input.as_str(), Style::default().fg(Color::White))
    };

    // Submit control; greyed out while a request is in flight
    let submit_style = if query.is_loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(text, text_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Mood ")
            .title_bottom(Line::from(Span::styled(" Enter: search ", submit_style)).right_aligned())
            .padding(Padding::horizontal(1))
            .border_style(if is_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(input, area);

    if is_focused {
        if let Some(cursor_x) = input_cursor_x(area, ui_state.mood_input.chars().count()) {
            frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
        }
    }
}

/// Column after the typed text, or `None` once it runs past the right border
fn input_cursor_x(area: Rect, typed: usize) -> Option<u16> {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    // +2 for border and padding
    let cursor_x = area.x.saturating_add(2).saturating_add(typed);
    let right_border = area.x.saturating_add(area.width.saturating_sub(1));
    (cursor_x < right_border).then_some(cursor_x)
}

pub fn render_key_hints(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints = match ui_state.active_section {
        ActiveSection::Input => "Enter search · Esc clear · Tab results · Ctrl+Q quit",
        ActiveSection::Results => "↑/↓ select · Enter/o open · Tab/Esc back · Ctrl+Q quit",
    };
    let footer = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
