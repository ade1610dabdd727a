//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, watch};

use super::error::RecommendError;
use super::query::{QueryState, Song};
use super::types::{ActiveSection, StalePolicy, UiState};

const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Main application model containing all state.
///
/// Every write bumps a revision counter; the render loop subscribes to it
/// and redraws only when something changed.
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub query: Arc<Mutex<QueryState>>,
    pub should_quit: Arc<Mutex<bool>>,
    revision: watch::Sender<u64>,
}

impl AppModel {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            query: Arc::new(Mutex::new(QueryState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // ========================================================================
    // Query State
    // ========================================================================

    pub async fn get_query_state(&self) -> QueryState {
        self.query.lock().await.clone()
    }

    /// Move to `Loading` for `mood` and hand out the request's sequence number
    pub async fn begin_query(&self, mood: String) -> u64 {
        let request_id = self.query.lock().await.begin(mood);
        self.ui_state.lock().await.selected_song = 0;
        self.notify();
        request_id
    }

    pub async fn apply_query_result(
        &self,
        request_id: u64,
        result: Result<Vec<Song>, RecommendError>,
        policy: StalePolicy,
    ) -> bool {
        let applied = self.query.lock().await.apply(request_id, result, policy);
        if applied {
            self.ui_state.lock().await.selected_song = 0;
            self.notify();
        }
        applied
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
        self.notify();
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
        drop(state);
        self.notify();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
        self.notify();
    }

    pub async fn append_to_mood(&self, c: char) {
        self.ui_state.lock().await.mood_input.push(c);
        self.notify();
    }

    pub async fn backspace_mood(&self) {
        self.ui_state.lock().await.mood_input.pop();
        self.notify();
    }

    pub async fn clear_mood(&self) {
        self.ui_state.lock().await.mood_input.clear();
        self.notify();
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.selected_song > 0 {
            state.selected_song -= 1;
        }
        drop(state);
        self.notify();
    }

    pub async fn move_selection_down(&self) {
        let song_count = self.query.lock().await.songs().len();
        let mut state = self.ui_state.lock().await;
        if state.selected_song < song_count.saturating_sub(1) {
            state.selected_song += 1;
        }
        drop(state);
        self.notify();
    }

    pub async fn get_selected_song(&self) -> Option<Song> {
        let selected = self.ui_state.lock().await.selected_song;
        self.query.lock().await.songs().get(selected).cloned()
    }

    // ========================================================================
    // Notices (errors outside the query, e.g. browser launch)
    // ========================================================================

    pub async fn set_notice(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(message);
        state.notice_timestamp = Some(Instant::now());
        drop(state);
        self.notify();
    }

    pub async fn clear_notice(&self) {
        let mut state = self.ui_state.lock().await;
        state.notice = None;
        state.notice_timestamp = None;
        drop(state);
        self.notify();
    }

    pub async fn auto_clear_old_notices(&self) {
        let expired = self
            .ui_state
            .lock()
            .await
            .notice_timestamp
            .is_some_and(|t| t.elapsed() > NOTICE_TTL);
        if expired {
            self.clear_notice().await;
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
