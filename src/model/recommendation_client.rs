//! HTTP client for the mood recommendation service

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::error::{GENERIC_SERVICE_ERROR, RecommendError};
use super::query::Song;

const RECOMMEND_PATH: &str = "recommend";

/// Anything that can turn a mood into a list of songs
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendations(&self, mood: &str) -> Result<Vec<Song>, RecommendError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Recommendation service client. One GET per call, no retries.
#[derive(Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecommendationClient {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// `{base}/recommend?mood=<mood>`, mood sent untrimmed
    pub fn recommend_url(&self, mood: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), RECOMMEND_PATH);
        url.set_path(&path);
        url.set_query(None);
        url.query_pairs_mut().append_pair("mood", mood);
        url
    }
}

#[async_trait]
impl RecommendationSource for RecommendationClient {
    async fn fetch_recommendations(&self, mood: &str) -> Result<Vec<Song>, RecommendError> {
        let url = self.recommend_url(mood);
        tracing::debug!(mood, url = %url, "Recommendation request started");

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!(mood, error = %e, "Recommendation request failed to send");
            RecommendError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        let result = parse_response(status, &body);
        match &result {
            Ok(songs) => tracing::info!(mood, status = status.as_u16(), songs = songs.len(), "Recommendations received"),
            Err(e) => tracing::warn!(mood, status = status.as_u16(), kind = e.kind(), error = %e, "Recommendation request failed"),
        }
        result
    }
}

/// Status is checked before the payload shape. A success body that is not
/// JSON at all is a transport failure, like a body that could not be read.
pub fn parse_response(status: StatusCode, body: &[u8]) -> Result<Vec<Song>, RecommendError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
        return Err(RecommendError::Service(message));
    }

    let payload: Value =
        serde_json::from_slice(body).map_err(|e| RecommendError::Transport(e.to_string()))?;

    let songs = payload
        .get("songs")
        .and_then(Value::as_array)
        .ok_or(RecommendError::MalformedResponse)?;

    songs
        .iter()
        .map(|s| serde_json::from_value::<Song>(s.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| RecommendError::MalformedResponse)
}
