use std::sync::Arc;

use crate::bus::hub::EventBus;
use crate::engine::provider::{DatasetProvider, MemoryDataset};
use crate::frontend::server_state::ServerState;
use crate::shared::config::CONFIG;
use crate::shared::time::now_ms;

/// Everything the HTTP surface needs, wired once at startup. The bus is
/// injected rather than global so tests can build a fresh one per case.
pub struct FrontendContext {
    pub bus: Arc<EventBus>,
    pub provider: Arc<dyn DatasetProvider>,
    pub server_state: Arc<ServerState>,
    pub started_at_ms: i64,
}

impl FrontendContext {
    pub fn from_config() -> Arc<Self> {
        Arc::new(Self {
            bus: Arc::new(EventBus::new(CONFIG.cognitive.max_subscribers)),
            provider: Arc::new(MemoryDataset::new()),
            server_state: Arc::new(ServerState::new()),
            started_at_ms: now_ms(),
        })
    }
}
