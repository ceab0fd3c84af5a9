use std::sync::Arc;

use crate::adapters::InMemoryGameStore;
use crate::config::ServerConfig;
use crate::repos::games::GameStore;
use crate::services::games::GameService;

/// Shared resources handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameService>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, config: ServerConfig) -> Self {
        Self {
            games: Arc::new(GameService::new(store)),
            config,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(Arc::new(InMemoryGameStore::new()), config)
    }
}
