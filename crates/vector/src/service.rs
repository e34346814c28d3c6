use promptvec_common::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::engine::{self, SearchHit, SearchRequest};
use crate::repository::StoreRepository;
use crate::types::{NewEmbedding, NewVectorStore, VectorStore, VectorStoreUpdate};

/// Vector store operations over a storage collaborator
pub struct VectorStoreService {
    repository: Arc<dyn StoreRepository>,
    /// Serializes load-modify-persist cycles; searches never take it
    write_gate: Mutex<()>,
}

impl VectorStoreService {
    pub fn new(repository: Arc<dyn StoreRepository>) -> Self {
        Self {
            repository,
            write_gate: Mutex::new(()),
        }
    }

    /// Rank the store's embeddings against `request.vector`
    pub async fn search(&self, store_id: &str, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let store = self.repository.load_store(store_id).await?;
        engine::search(&store, request)
    }

    /// Append an embedding and persist the store
    pub async fn add_embedding(&self, store_id: &str, embedding: NewEmbedding) -> Result<VectorStore> {
        let _guard = self.write_gate.lock().await;

        let mut store = self.repository.load_store(store_id).await?;
        let embedding_id = embedding.id.clone();
        store.add_embedding(embedding)?;
        self.repository.persist_store(&store).await?;

        info!(
            "Embedding {} added to vector store {} ({} total)",
            embedding_id,
            store.id,
            store.count()
        );
        Ok(store)
    }

    /// Remove an embedding by id and persist the store
    pub async fn remove_embedding(&self, store_id: &str, embedding_id: &str) -> Result<VectorStore> {
        let _guard = self.write_gate.lock().await;

        let mut store = self.repository.load_store(store_id).await?;
        store.remove_embedding(embedding_id)?;
        self.repository.persist_store(&store).await?;

        info!("Embedding {} removed from vector store {}", embedding_id, store.id);
        Ok(store)
    }

    pub async fn create_store(&self, request: NewVectorStore) -> Result<VectorStore> {
        let store = VectorStore::create(request)?;

        let _guard = self.write_gate.lock().await;
        self.repository.persist_store(&store).await?;

        info!(
            "Vector store created: {} (name={}, namespace={}, dimension={})",
            store.id, store.name, store.namespace, store.vector_dimension
        );
        Ok(store)
    }

    /// Stores newest first, optionally restricted to one namespace
    pub async fn list_stores(&self, namespace: Option<&str>) -> Result<Vec<VectorStore>> {
        let mut stores = self.repository.list_stores().await?;
        if let Some(namespace) = namespace {
            stores.retain(|s| s.namespace == namespace);
        }
        stores.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!("Listed {} vector stores (namespace={:?})", stores.len(), namespace);
        Ok(stores)
    }

    pub async fn get_store(&self, store_id: &str) -> Result<VectorStore> {
        self.repository.load_store(store_id).await
    }

    pub async fn update_store(&self, store_id: &str, update: VectorStoreUpdate) -> Result<VectorStore> {
        let _guard = self.write_gate.lock().await;

        let mut store = self.repository.load_store(store_id).await?;
        store.apply_update(update)?;
        self.repository.persist_store(&store).await?;

        info!("Vector store updated: {}", store.id);
        Ok(store)
    }

    pub async fn delete_store(&self, store_id: &str) -> Result<()> {
        let _guard = self.write_gate.lock().await;

        self.repository.delete_store(store_id).await?;

        info!("Vector store deleted: {}", store_id);
        Ok(())
    }
}
