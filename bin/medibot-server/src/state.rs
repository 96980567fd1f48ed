//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::Arc;

use medibot_responder::Intent;

use crate::config::Config;
use crate::entities::SqliteStore;

/// Picks the intent for a chat message.
#[derive(Clone, Copy)]
pub struct Classifier(pub fn(&str) -> Intent);

impl Default for Classifier {
    fn default() -> Self {
        Self(medibot_responder::classify)
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Classifier(..)")
    }
}

/// State shared across all HTTP handlers.
///
/// Built once in `main`, cloned as `Arc<AppState>` into the router, and
/// dropped after graceful shutdown.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Users, sessions and the chat log.
    pub store: Arc<SqliteStore>,
    pub classifier: Classifier,
}

impl AppState {
    pub fn new(config: Config, store: SqliteStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            classifier: Classifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }
}
