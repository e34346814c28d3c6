//! PromptVec Vector Store
//!
//! Embedding records, cosine similarity search and store persistence

pub mod engine;
pub mod repository;
pub mod service;
pub mod similarity;
pub mod types;

pub use engine::{matches_filters, search, MetadataFilters, SearchHit, SearchRequest, DEFAULT_SEARCH_LIMIT};
pub use repository::{InMemoryRepository, JsonFileRepository, StoreRepository};
pub use service::VectorStoreService;
pub use similarity::cosine_similarity;
pub use types::{
    Embedding, Metadata, MetadataValue, NewEmbedding, NewVectorStore, VectorStore,
    VectorStoreUpdate,
};
