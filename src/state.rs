use std::sync::Arc;

use crate::{
    config::AppConfig,
    fixtures,
    gateway::MockGateway,
    store::{CatalogStore, OrderStore, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<CatalogStore>,
    pub sessions: Arc<SessionStore>,
    pub orders: Arc<OrderStore>,
    pub gateway: Arc<MockGateway>,
}

impl AppState {
    /// Seed the mock stores and wire the simulated upstream.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = fixtures::seed_catalog()?;
        let gateway = MockGateway::from_config(&config);
        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new()),
            orders: Arc::new(OrderStore::new()),
            gateway: Arc::new(gateway),
        })
    }
}
