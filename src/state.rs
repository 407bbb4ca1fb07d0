use std::sync::Arc;

use crate::{
    catalog::CatalogClient,
    config::AppConfig,
    middleware::session::BuyerSession,
    store::{FileStore, KeyValueStore, MemoryStore, ScopedStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: CatalogClient,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => {
                let store = FileStore::open(path)?;
                tracing::info!(path = %store.path().display(), "using file-backed store");
                Arc::new(store)
            }
            None => {
                tracing::info!("using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        let catalog = CatalogClient::new(&config.catalog_api_url, config.catalog_timeout)?;
        Ok(Self { store, catalog })
    }

    /// The buyer's private slice of the shared store.
    pub fn store_for(&self, session: &BuyerSession) -> ScopedStore {
        ScopedStore::new(self.store.clone(), &session.buyer_key)
    }
}
