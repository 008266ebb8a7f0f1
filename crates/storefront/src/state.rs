//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{CartStore, Catalog, CatalogError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the shared cart store and product catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    carts: CartStore,
    catalog: Catalog,
}

impl AppState {
    /// Create application state, loading the catalog from disk when
    /// `STOREFRONT_CATALOG_PATH` is configured.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog file cannot be loaded.
    pub async fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path).await?,
            None => {
                tracing::warn!("STOREFRONT_CATALOG_PATH not set, starting with an empty catalog");
                Catalog::empty()
            }
        };
        tracing::info!(products = catalog.len(), "Catalog loaded");

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already loaded catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = CartStore::new(&config.carts);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                carts,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shared cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
