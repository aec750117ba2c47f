use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::{CheeseStore, DbCheeseStore};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cheeses: Arc<dyn CheeseStore>,
    pub config: AppConfig,
}

impl AppState {
    /// State backed by `db` for both accounts and cheeses.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            cheeses: Arc::new(DbCheeseStore::new(db.clone())),
            db,
            config,
        }
    }
}
