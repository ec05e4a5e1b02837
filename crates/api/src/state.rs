use std::sync::Arc;

use cinema_db::CatalogStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Catalogue persistence, PostgreSQL or in-memory.
    pub store: Arc<dyn CatalogStore>,
}
