//! View module - UI rendering
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Header, mood input and key hints
//! - `results`: Loading indicator, error region and song list
//! - `overlays`: Notice popup

mod utils;
mod layout;
mod results;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{QueryState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, query: &QueryState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Mood input
                Constraint::Min(0),    // Results
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0]);
        layout::render_mood_input(frame, chunks[1], ui_state, query);
        results::render_results(frame, chunks[2], ui_state, query);
        layout::render_key_hints(frame, chunks[3], ui_state);

        if ui_state.notice.is_some() {
            overlays::render_notice(frame, ui_state);
        }
    }
}
