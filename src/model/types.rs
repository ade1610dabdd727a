//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Input,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Input => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Input,
        }
    }
}

/// What to do with a response whose request is no longer the newest one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Whichever request resolves last overwrites the state
    #[default]
    LastWriteWins,
    /// Only the most recently started request may update the state
    LatestOnly,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub mood_input: String,
    pub selected_song: usize,
    /// Errors that are not part of the query itself (e.g. browser launch)
    pub notice: Option<String>,
    pub notice_timestamp: Option<Instant>,
}
