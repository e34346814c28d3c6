use crate::error::PromptVecError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (e.g. `PROMPTVEC_SERVER_PORT`)
pub const ENV_PREFIX: &str = "PROMPTVEC";

/// Backing store for vector store documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// JSON file under the database directory
    File,
    /// Process memory only; lost on shutdown
    Memory,
}

/// PromptVec application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database base path
    pub db_base_path: PathBuf,

    /// Vector store document file, relative to `db_base_path` unless absolute
    pub store_file: PathBuf,

    /// Storage backend
    pub storage: StorageKind,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Result count when a search request omits `limit`
    pub default_search_limit: usize,

    /// Largest `limit` accepted from HTTP callers
    pub max_search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_base_path: PathBuf::from("./db"),
            store_file: PathBuf::from("vector_stores.json"),
            storage: StorageKind::File,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            log_dir: PathBuf::from("./db/log"),
            log_level: "info".to_string(),
            default_search_limit: 5,
            max_search_limit: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the optional config file and environment variables
    pub fn from_env() -> Result<Self, PromptVecError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::load(None)
    }

    /// Build configuration in layers: defaults, then config file, then `PROMPTVEC_*` env vars
    ///
    /// Without an explicit path, `promptvec.{toml,json,yaml}` in the working
    /// directory is picked up when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, PromptVecError> {
        Self::load_with_prefix(config_file, ENV_PREFIX)
    }

    fn load_with_prefix(config_file: Option<&Path>, env_prefix: &str) -> Result<Self, PromptVecError> {
        let defaults = config::Config::try_from(&AppConfig::default())?;

        let file_source = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("promptvec").required(false),
        };

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), PromptVecError> {
        let dirs = vec![&self.db_base_path, &self.log_dir];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    PromptVecError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Full path of the vector store document file
    pub fn store_file_path(&self) -> PathBuf {
        if self.store_file.is_absolute() {
            self.store_file.clone()
        } else {
            self.db_base_path.join(&self.store_file)
        }
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), PromptVecError> {
        if self.server_port == 0 {
            return Err(PromptVecError::config("Server port cannot be 0"));
        }

        if self.log_level.trim().is_empty() {
            return Err(PromptVecError::config("Log level cannot be empty"));
        }

        if self.default_search_limit == 0 || self.max_search_limit == 0 {
            return Err(PromptVecError::config("Search limits must be positive"));
        }

        if self.default_search_limit > self.max_search_limit {
            return Err(PromptVecError::config(format!(
                "Default search limit {} exceeds max search limit {}",
                self.default_search_limit, self.max_search_limit
            )));
        }

        if self.storage == StorageKind::File && self.store_file.as_os_str().is_empty() {
            return Err(PromptVecError::config("Store file path cannot be empty"));
        }

        Ok(())
    }
}
