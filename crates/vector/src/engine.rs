use promptvec_common::{PromptVecError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::similarity::cosine_similarity;
use crate::types::{ensure_finite, Metadata, MetadataValue, VectorStore};

/// Result count when a request leaves `limit` unset
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Required metadata values (key -> value), all of which must match
pub type MetadataFilters = BTreeMap<String, MetadataValue>;

/// Similarity search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query vector, `len == store.vector_dimension`
    pub vector: Vec<f32>,

    /// Maximum number of hits, [`DEFAULT_SEARCH_LIMIT`] when unset
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub filters: MetadataFilters,
}

impl SearchRequest {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            limit: None,
            filters: MetadataFilters::new(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub text: String,

    /// Cosine similarity in [-1, 1]
    pub similarity: f32,

    pub metadata: Metadata,
}

/// Rank a store's embeddings against the query vector
///
/// Brute-force linear scan: every embedding that passes `filters` is scored,
/// the candidates are stably sorted by descending similarity (ties keep
/// insertion order) and the first `limit` are returned.
pub fn search(store: &VectorStore, request: &SearchRequest) -> Result<Vec<SearchHit>> {
    store.check_dimension(request.vector.len())?;
    ensure_finite(&request.vector)?;

    let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if limit == 0 {
        return Err(PromptVecError::invalid_input("limit must be a positive integer"));
    }

    let mut hits: Vec<SearchHit> = store
        .embeddings
        .iter()
        .filter(|embedding| matches_filters(&embedding.metadata, &request.filters))
        .map(|embedding| SearchHit {
            id: embedding.id.clone(),
            text: embedding.text.clone(),
            similarity: cosine_similarity(&request.vector, &embedding.vector),
            metadata: embedding.metadata.clone(),
        })
        .collect();
    let candidates = hits.len();

    // `sort_by` is stable
    hits.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    hits.truncate(limit);

    debug!(
        "Search on store {} - {} hits (from {} candidates, {} embeddings)",
        store.id,
        hits.len(),
        candidates,
        store.count()
    );

    Ok(hits)
}

/// True when every filter key is present in `metadata` with an equal value
pub fn matches_filters(metadata: &Metadata, filters: &MetadataFilters) -> bool {
    filters
        .iter()
        .all(|(key, expected)| metadata.get(key) == Some(expected))
}
