//! Recommendation controller methods (submit, apply, open link)

use tokio::task::JoinHandle;
use tracing::Instrument;
use url::Url;

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    /// Submit whatever is in the mood input. The request runs on its own
    /// task; overlapping submissions are neither deduplicated nor cancelled.
    pub async fn submit_mood(&self) -> JoinHandle<()> {
        let model = self.model.lock().await;
        let mood = model.get_ui_state().await.mood_input;
        let request_id = model.begin_query(mood.clone()).await;
        drop(model);

        tracing::debug!(request_id, mood = %mood, "Submitting mood");

        let controller = self.clone();
        let span = tracing::info_span!("recommend", request_id, mood = %mood);
        tokio::spawn(
            async move {
                controller.run_query(request_id, mood).await;
            }
            .instrument(span),
        )
    }

    async fn run_query(&self, request_id: u64, mood: String) {
        let result = self.source.fetch_recommendations(&mood).await;

        match &result {
            Ok(songs) => tracing::info!(songs = songs.len(), "Recommendations ready"),
            Err(e) => tracing::error!(kind = e.kind(), error = %e, "Recommendation failed"),
        }
        let has_songs = result.as_ref().is_ok_and(|songs| !songs.is_empty());

        let model = self.model.lock().await;
        if !model
            .apply_query_result(request_id, result, self.stale_policy)
            .await
        {
            tracing::debug!("Discarded result of a superseded request");
            return;
        }

        let query = model.get_query_state().await;
        tracing::debug!(
            applied = ?query.applied_request(),
            latest = query.latest_request(),
            "Result applied"
        );

        // Don't pull focus away if the user already started another query
        let is_latest = query.latest_request() == request_id;
        if has_songs && is_latest {
            model.set_active_section(ActiveSection::Results).await;
        }
    }

    /// Hand the selected song's link to the system browser. The model lock is
    /// released first so a slow launcher cannot stall rendering or input.
    pub async fn open_selected_song(&self) {
        let Some(song) = self.model.lock().await.get_selected_song().await else {
            return;
        };

        if !is_web_link(&song.url) {
            tracing::warn!(url = %song.url, "Refusing to open non-web song link");
            self.model
                .lock()
                .await
                .set_notice(format!("Could not open {}: not an http(s) link", song.url))
                .await;
            return;
        }

        tracing::info!(url = %song.url, "Opening song link");
        if let Err(e) = (self.open_link)(&song.url) {
            tracing::warn!(url = %song.url, error = %e, "Failed to open song link");
            self.model
                .lock()
                .await
                .set_notice(format!("Could not open {}: {}", song.url, e))
                .await;
        }
    }
}

/// Links come from the service, so only `http`/`https` reach the OS launcher
fn is_web_link(link: &str) -> bool {
    Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
