use async_trait::async_trait;
use promptvec_common::{PromptVecError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::types::VectorStore;

/// Storage collaborator for vector store documents
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Load a snapshot of one store
    async fn load_store(&self, store_id: &str) -> Result<VectorStore>;

    /// Insert or replace a store
    async fn persist_store(&self, store: &VectorStore) -> Result<()>;

    /// All stores, unordered
    async fn list_stores(&self) -> Result<Vec<VectorStore>>;

    async fn delete_store(&self, store_id: &str) -> Result<()>;
}

/// Process-local repository
#[derive(Default)]
pub struct InMemoryRepository {
    stores: RwLock<BTreeMap<String, VectorStore>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreRepository for InMemoryRepository {
    async fn load_store(&self, store_id: &str) -> Result<VectorStore> {
        self.stores
            .read()
            .await
            .get(store_id)
            .cloned()
            .ok_or_else(|| PromptVecError::store_not_found(store_id))
    }

    async fn persist_store(&self, store: &VectorStore) -> Result<()> {
        self.stores
            .write()
            .await
            .insert(store.id.clone(), store.clone());
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<VectorStore>> {
        Ok(self.stores.read().await.values().cloned().collect())
    }

    async fn delete_store(&self, store_id: &str) -> Result<()> {
        self.stores
            .write()
            .await
            .remove(store_id)
            .map(|_| ())
            .ok_or_else(|| PromptVecError::store_not_found(store_id))
    }
}

/// Repository backed by a single JSON document file
///
/// All stores are kept in memory and the whole map is rewritten on every
/// mutation. A failed write leaves both the file and the in-memory map at
/// their previous state.
pub struct JsonFileRepository {
    stores: RwLock<BTreeMap<String, VectorStore>>,
    file_path: PathBuf,
}

impl JsonFileRepository {
    /// Open the file, starting empty when it does not exist yet
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let stores: BTreeMap<String, VectorStore> = match tokio::fs::read_to_string(&file_path).await {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                PromptVecError::persistence(format!(
                    "Corrupt store file {}: {}",
                    file_path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(PromptVecError::persistence(format!(
                    "Failed to read {}: {}",
                    file_path.display(),
                    e
                )))
            }
        };

        for store in stores.values() {
            for embedding in &store.embeddings {
                store.check_dimension(embedding.vector.len()).map_err(|e| {
                    PromptVecError::persistence(format!(
                        "Corrupt store file {}: store {} embedding {}: {}",
                        file_path.display(),
                        store.id,
                        embedding.id,
                        e
                    ))
                })?;
            }
        }

        info!(
            "Vector store repository opened - {} stores ({})",
            stores.len(),
            file_path.display()
        );

        Ok(Self {
            stores: RwLock::new(stores),
            file_path,
        })
    }

    /// Write the map to a sibling temp file, then rename over the target
    async fn save(&self, stores: &BTreeMap<String, VectorStore>) -> Result<()> {
        let data = serde_json::to_string_pretty(stores)?;

        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PromptVecError::persistence(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await.map_err(|e| {
            PromptVecError::persistence(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.file_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(PromptVecError::persistence(format!(
                "Failed to replace {}: {}",
                self.file_path.display(),
                e
            )));
        }

        debug!("Saved {} stores to {}", stores.len(), self.file_path.display());
        Ok(())
    }
}

#[async_trait]
impl StoreRepository for JsonFileRepository {
    async fn load_store(&self, store_id: &str) -> Result<VectorStore> {
        self.stores
            .read()
            .await
            .get(store_id)
            .cloned()
            .ok_or_else(|| PromptVecError::store_not_found(store_id))
    }

    async fn persist_store(&self, store: &VectorStore) -> Result<()> {
        let mut stores = self.stores.write().await;
        let previous = stores.insert(store.id.clone(), store.clone());

        if let Err(e) = self.save(&stores).await {
            match previous {
                Some(previous) => stores.insert(store.id.clone(), previous),
                None => stores.remove(&store.id),
            };
            return Err(e);
        }

        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<VectorStore>> {
        Ok(self.stores.read().await.values().cloned().collect())
    }

    async fn delete_store(&self, store_id: &str) -> Result<()> {
        let mut stores = self.stores.write().await;
        let removed = stores
            .remove(store_id)
            .ok_or_else(|| PromptVecError::store_not_found(store_id))?;

        if let Err(e) = self.save(&stores).await {
            stores.insert(store_id.to_string(), removed);
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewEmbedding, NewVectorStore};

    fn sample_store() -> VectorStore {
        let mut request = NewVectorStore::new("docs", "default", 2, "test-model");
        request.embeddings = vec![
            NewEmbedding::new("a", "alpha", vec![1.0, 0.0]).with_metadata("lang", "en"),
        ];
        VectorStore::create(request).unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let repo = InMemoryRepository::new();
        let store = sample_store();

        repo.persist_store(&store).await.unwrap();
        let loaded = repo.load_store(&store.id).await.unwrap();
        assert_eq!(loaded.count(), 1);
        assert_eq!(repo.list_stores().await.unwrap().len(), 1);

        repo.delete_store(&store.id).await.unwrap();
        assert!(matches!(
            repo.load_store(&store.id).await,
            Err(PromptVecError::StoreNotFound(_))
        ));
        assert!(matches!(
            repo.delete_store(&store.id).await,
            Err(PromptVecError::StoreNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_json_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        let store = sample_store();

        {
            let repo = JsonFileRepository::open(&path).await.unwrap();
            assert!(repo.list_stores().await.unwrap().is_empty());
            repo.persist_store(&store).await.unwrap();
        }

        let reopened = JsonFileRepository::open(&path).await.unwrap();
        let loaded = reopened.load_store(&store.id).await.unwrap();
        assert_eq!(loaded.name, "docs");
        assert_eq!(loaded.embeddings[0].vector, vec![1.0, 0.0]);
        assert_eq!(loaded.embeddings[0].timestamp, store.embeddings[0].timestamp);

        reopened.delete_store(&store.id).await.unwrap();
        let reopened = JsonFileRepository::open(&path).await.unwrap();
        assert!(reopened.list_stores().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let result = JsonFileRepository::open(&path).await;
        assert!(matches!(result, Err(PromptVecError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_json_file_rejects_dimension_violation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");

        let mut store = sample_store();
        store.embeddings[0].vector = vec![1.0, 0.0, 0.0];
        let mut stores = BTreeMap::new();
        stores.insert(store.id.clone(), store);
        tokio::fs::write(&path, serde_json::to_string(&stores).unwrap())
            .await
            .unwrap();

        let result = JsonFileRepository::open(&path).await;
        match result {
            Err(PromptVecError::Persistence(msg)) => assert!(msg.contains("Corrupt store file")),
            _ => panic!("dimension violation must fail to open"),
        }
    }

    #[tokio::test]
    async fn test_json_file_rename_failure_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        let repo = JsonFileRepository::open(&path).await.unwrap();

        // A non-empty directory at the target path makes the rename fail
        tokio::fs::create_dir_all(path.join("occupied")).await.unwrap();

        let result = repo.persist_store(&sample_store()).await;
        assert!(matches!(result, Err(PromptVecError::Persistence(_))));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(repo.list_stores().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_write_failure_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let repo = JsonFileRepository::open(blocker.join("stores.json")).await.unwrap();
        // Parent directory is now a regular file, so every save fails
        tokio::fs::write(&blocker, "").await.unwrap();

        let store = sample_store();
        let result = repo.persist_store(&store).await;
        assert!(matches!(result, Err(PromptVecError::Persistence(_))));
        assert!(repo.list_stores().await.unwrap().is_empty());
    }
}
