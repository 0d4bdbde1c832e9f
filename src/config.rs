use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where recipe and preference data is stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Timeout for fetching a recipe page, in seconds
    pub scrape_timeout_secs: u64,
    /// Maximum recipes returned by the list endpoint
    pub list_limit: usize,
    /// Default number of search results
    pub search_limit: usize,
    /// Candidate pool scanned by vector search before the limit is applied
    pub search_candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for chat completions (enrichment, planning, substitutes)
    pub chat_model: String,
    /// Model name for embeddings
    pub embedding_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:3001".to_string(),
            llm: LlmConfig::default(),
            scrape_timeout_secs: 30,
            list_limit: 50,
            search_limit: 10,
            search_candidates: 100,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            api_key: None,
            embedding_dim: 768,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("RECIPE_VIBES_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("RECIPE_VIBES_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(model) = std::env::var("LLM_EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("LLM_EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.llm.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("RECIPE_VIBES_SCRAPE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.scrape_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("RECIPE_VIBES_LIST_LIMIT") {
            if let Ok(v) = val.parse() {
                config.list_limit = v;
            }
        }
        if let Ok(val) = std::env::var("RECIPE_VIBES_SEARCH_LIMIT") {
            if let Ok(v) = val.parse() {
                config.search_limit = v;
            }
        }
        if let Ok(val) = std::env::var("RECIPE_VIBES_SEARCH_CANDIDATES") {
            if let Ok(v) = val.parse() {
                config.search_candidates = v;
            }
        }

        config
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join("recipes.json")
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join("prefs.json")
    }
}
