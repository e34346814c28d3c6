use promptvec_vector::SearchHit;
use serde::{Deserialize, Serialize};

/// Vector store listing query
#[derive(Debug, Deserialize)]
pub struct ListStoresQuery {
    /// Only stores in this namespace
    pub namespace: Option<String>,
}

/// Plain message body (errors, deletions)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Similarity search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
