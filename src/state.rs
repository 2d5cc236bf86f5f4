use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::repo::{PgUserStore, UserStore};
use crate::catalog::repo::{CatalogStore, PgCatalogStore};
use crate::memory::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub catalog: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn postgres(db: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(db.clone())),
            catalog: Arc::new(PgCatalogStore::new(db)),
        }
    }

    /// Both stores backed by one in-process store, for tests and local runs.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            catalog: store,
        }
    }
}
