use promptvec_common::{AppConfig, Result, StorageKind};
use promptvec_vector::{InMemoryRepository, JsonFileRepository, StoreRepository, VectorStoreService};
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Vector store operations
    pub vector_stores: VectorStoreService,
}

impl AppState {
    /// Create application state with the repository selected by `config.storage`
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository: Arc<dyn StoreRepository> = match config.storage {
            StorageKind::File => {
                Arc::new(JsonFileRepository::open(config.store_file_path()).await?)
            }
            StorageKind::Memory => {
                info!("Using in-memory vector store repository; data is not persisted");
                Arc::new(InMemoryRepository::new())
            }
        };

        Ok(Self::with_repository(config, repository))
    }

    pub fn with_repository(config: AppConfig, repository: Arc<dyn StoreRepository>) -> Self {
        Self {
            config,
            vector_stores: VectorStoreService::new(repository),
        }
    }
}
