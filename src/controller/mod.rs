//! Controller module - Application logic and event handling
//!
//! - `input`: Key event handling
//! - `recommend`: Submitting moods, applying results, opening song links

mod input;
mod recommend;

use std::io;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, RecommendationSource, StalePolicy};

/// Opens a song URL outside the terminal
pub type LinkOpener = Arc<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    source: Arc<dyn RecommendationSource>,
    stale_policy: StalePolicy,
    open_link: LinkOpener,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        source: Arc<dyn RecommendationSource>,
        stale_policy: StalePolicy,
    ) -> Self {
        Self {
            model,
            source,
            stale_policy,
            open_link: Arc::new(|url: &str| open::that_detached(url)),
        }
    }

    pub fn with_link_opener(mut self, open_link: LinkOpener) -> Self {
        self.open_link = open_link;
        self
    }
}
