//! Application state shared across all handlers.

use bb_core::BinBotConfig;
use bb_session::SessionManager;
use bb_storage::ImageStore;
use bb_vision::{HeuristicEngine, VisionEngine};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state. The session id is the only cross-request
/// correlation key; every request is independently schedulable.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub images: ImageStore,
    pub engine: Arc<dyn VisionEngine>,
    /// Server-side bound on engine calls, symmetric to the client timeout.
    pub command_timeout: Duration,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(&BinBotConfig::default())
    }

    pub fn from_config(config: &BinBotConfig) -> Self {
        Self {
            sessions: SessionManager::new(config.session.ttl_minutes),
            images: ImageStore::new(),
            engine: Arc::new(HeuristicEngine::new()),
            command_timeout: Duration::from_secs(config.engine.command_timeout_secs),
            start_time: std::time::Instant::now(),
        }
    }

    /// Swap the vision engine, keeping everything else.
    pub fn with_engine(mut self, engine: Arc<dyn VisionEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
