use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::storage::{AuctionDatabase, ensure_parent_dir};

pub struct ApiState {
    pub config: AppConfig,
    /// Single SQLite connection; writes go through `create_if_higher`
    pub db: Mutex<AuctionDatabase>,
}

impl ApiState {
    pub fn new(config: AppConfig, db: AuctionDatabase) -> Arc<Self> {
        Arc::new(Self {
            config,
            db: Mutex::new(db),
        })
    }

    /// Open the database file named in the config
    pub fn open(config: AppConfig) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        ensure_parent_dir(&config.database_path)?;
        let db = AuctionDatabase::with_path(&config.database_path)?;
        log::info!("Opened bid store at {}", config.database_path);
        Ok(Self::new(config, db))
    }
}
