use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::api::rest::routes;
use crate::config::FilmorateConfig;
use crate::contract::client::FilmorateApi;
use crate::domain::Catalog;
use crate::gateways::local::FilmorateLocalClient;

/// The filmorate module: owns the catalog and hands out its REST surface
/// and in-process client.
#[derive(Clone)]
pub struct Filmorate {
    catalog: Catalog,
    config: FilmorateConfig,
}

impl Default for Filmorate {
    fn default() -> Self {
        Self::new(FilmorateConfig::default())
    }
}

impl Filmorate {
    /// Module backed by fresh in-memory storage.
    pub fn new(config: FilmorateConfig) -> Self {
        Self::with_catalog(Catalog::in_memory(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: FilmorateConfig) -> Self {
        info!(
            default_popular_count = config.default_popular_count,
            max_popular_count = config.max_popular_count,
            "Filmorate module initialized"
        );
        Self { catalog, config }
    }

    pub fn config(&self) -> &FilmorateConfig {
        &self.config
    }

    /// In-process client sharing this module's state.
    pub fn client(&self) -> Arc<dyn FilmorateApi> {
        Arc::new(FilmorateLocalClient::new(self.catalog.clone()))
    }

    /// Register the module's routes onto `router`.
    pub fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        let router = routes::register_routes(router, self.catalog.clone(), self.config.clone())?;
        info!("Filmorate REST routes registered");
        Ok(router)
    }
}
