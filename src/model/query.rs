//! Query state: the mood being looked up and the outcome of the last request

use serde::Deserialize;

use super::error::RecommendError;
use super::types::StalePolicy;

/// A recommended track
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Song {
    pub name: String,
    pub artist: String,
    pub url: String,
}

/// Where the query currently stands. Songs and error are carried by the
/// variant so only one of them can ever be present.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success(Vec<Song>),
    Failed(RecommendError),
}

#[derive(Clone, Debug, Default)]
pub struct QueryState {
    pub mood: String,
    pub status: QueryStatus,
    /// Sequence number of the most recently started request
    latest_request: u64,
    /// Sequence number of the request whose result is displayed
    applied_request: Option<u64>,
}

impl QueryState {
    /// Start a new request. Previous songs and error are dropped.
    pub fn begin(&mut self, mood: String) -> u64 {
        self.latest_request += 1;
        self.mood = mood;
        self.status = QueryStatus::Loading;
        self.latest_request
    }

    /// Apply a finished request. Returns `false` when the result was discarded.
    pub fn apply(
        &mut self,
        request_id: u64,
        result: Result<Vec<Song>, RecommendError>,
        policy: StalePolicy,
    ) -> bool {
        if policy == StalePolicy::LatestOnly && request_id != self.latest_request {
            return false;
        }

        self.status = match result {
            Ok(songs) => QueryStatus::Success(songs),
            Err(e) => QueryStatus::Failed(e),
        };
        self.applied_request = Some(request_id);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn songs(&self) -> &[Song] {
        match &self.status {
            QueryStatus::Success(songs) => songs,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            QueryStatus::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn applied_request(&self) -> Option<u64> {
        self.applied_request
    }
}
