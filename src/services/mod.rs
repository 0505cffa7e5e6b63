//! Business logic services

pub mod lending;
pub mod stats;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::LoansConfig;

/// Lending service shared by request handlers; each handler holds the lock
/// for a single operation.
pub type SharedLending = Arc<RwLock<lending::LendingService>>;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lending: SharedLending,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services around a fresh, empty library
    pub fn new(loans_config: LoansConfig) -> Self {
        Self {
            lending: Arc::new(RwLock::new(lending::LendingService::new(loans_config))),
            stats: stats::StatsService::new(),
        }
    }
}
