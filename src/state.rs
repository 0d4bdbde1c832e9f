use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{Config, LlmConfig};
use crate::prefs::{JsonFileStore, Preferences};
use crate::store::RecipeStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<RecipeStore>,
    pub prefs: Preferences,
    pub http_client: reqwest::Client,
    pub llm_config: Arc<RwLock<LlmConfig>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let store = RecipeStore::open_or_create(&config.recipes_path())?;
        let prefs = Preferences::new(Arc::new(JsonFileStore::open_or_create(
            &config.prefs_path(),
        )?));

        let llm_config = config.llm.clone();

        Ok(Self {
            config,
            store: Arc::new(store),
            prefs,
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            llm_config: Arc::new(RwLock::new(llm_config)),
        })
    }

    /// Flush persisted state. Called once at shutdown.
    pub fn close(&self) {
        if let Err(e) = self.store.close() {
            tracing::warn!("Failed to flush recipe store on shutdown: {e:#}");
        }
    }
}
