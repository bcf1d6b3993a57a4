//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::TransportNetwork;
use crate::planner::QuietConfig;

/// Shared application state.
///
/// The network is the sole shared resource: queries take a read lock,
/// passenger events take a write lock. No lock is held across an await
/// point.
#[derive(Clone)]
pub struct AppState {
    /// The live transport network
    pub network: Arc<RwLock<TransportNetwork>>,

    /// Defaults for quiet-route queries
    pub quiet: Arc<QuietConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: TransportNetwork, quiet: QuietConfig) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
            quiet: Arc::new(quiet),
        }
    }
}
