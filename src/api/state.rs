use std::sync::Arc;

use crate::catalog::Catalog;
use crate::services::providers::MetadataProvider;

/// Shared application state
///
/// Constructed once at startup and injected into every handler. The catalog
/// and the metadata provider are immutable for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(catalog: Catalog, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            provider,
        }
    }
}
