//! Model module - Application state and data types
//!
//! - `types`: UI focus, stale-result policy and UI state
//! - `query`: songs and the query state machine
//! - `error`: recommendation error taxonomy
//! - `recommendation_client`: HTTP client for the recommendation service
//! - `app_model`: Main application model with state management methods

mod types;
mod query;
mod error;
mod recommendation_client;
mod app_model;

pub use types::{ActiveSection, StalePolicy, UiState};

pub use query::{QueryState, QueryStatus, Song};

pub use error::RecommendError;

pub use recommendation_client::{RecommendationClient, RecommendationSource};

pub use app_model::AppModel;
