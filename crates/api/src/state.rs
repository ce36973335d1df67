use std::sync::Arc;

use takeoff_db::{BudgetStore, CalculationStore, DbPool, EarthworkStore, MemoryStore, PgStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database connection pool, absent when running on the in-memory store.
    pub pool: Option<DbPool>,
    pub calculations: Arc<dyn CalculationStore>,
    pub budgets: Arc<dyn BudgetStore>,
    pub earthworks: Arc<dyn EarthworkStore>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn postgres(config: ServerConfig, pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            config: Arc::new(config),
            pool: Some(pool),
            calculations: store.clone(),
            budgets: store.clone(),
            earthworks: store,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config: Arc::new(config),
            pool: None,
            calculations: store.clone(),
            budgets: store.clone(),
            earthworks: store,
        }
    }

    /// Name of the active store backend, reported by `/health`.
    pub fn store_kind(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
