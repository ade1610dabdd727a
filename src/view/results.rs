//! Results area: loading indicator, error region, song list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, QueryState, QueryStatus, Song, UiState};
use super::utils::{render_scrollable_list, truncate_string};

pub const LOADING_TEXT: &str = "Finding the perfect songs for your mood...";
pub const RESULTS_TITLE: &str = " Recommended Songs ";
const OPEN_LABEL: &str = "Open ↗";

pub fn render_results(frame: &mut Frame, area: Rect, ui_state: &UiState, query: &QueryState) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match &query.status {
        QueryStatus::Idle => {
            let hint = Paragraph::new("Type how you feel and press Enter to get song recommendations")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(hint, area);
        }
        QueryStatus::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
        }
        QueryStatus::Failed(e) => {
            let error = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Error ")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(Color::Red)),
                );
            frame.render_widget(error, area);
        }
        QueryStatus::Success(songs) if songs.is_empty() => {
            let empty = Paragraph::new(format!("No songs found for \"{}\"", query.mood))
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(RESULTS_TITLE)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(empty, area);
        }
        QueryStatus::Success(songs) => {
            render_song_list(frame, area, songs, ui_state.selected_song, is_focused, border_style);
        }
    }
}

fn render_song_list(
    frame: &mut Frame,
    area: Rect,
    songs: &[Song],
    selected_index: usize,
    is_focused: bool,
    border_style: Style,
) {
    // borders(2) + padding(2) + "♪ "(2) + gap(2) + open label
    let text_width = (area.width as usize)
        .saturating_sub(8 + OPEN_LABEL.chars().count());

    let items: Vec<ListItem> = songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let is_selected = i == selected_index;
            let name_style = if is_selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let name = truncate_string(&song.name, text_width);
            let padding = text_width.saturating_sub(name.chars().count());

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("♪ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(name, name_style),
                    Span::raw(" ".repeat(padding + 2)),
                    Span::styled(OPEN_LABEL, Style::default().fg(Color::Cyan)),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        truncate_string(&song.artist, text_width),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(RESULTS_TITLE)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, items, selected_index, block);
}
