use chrono::{DateTime, Utc};
use promptvec_common::{PromptVecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Scalar metadata value
///
/// Nested objects and arrays do not deserialize into this type, so they are
/// rejected both in stored metadata and in search filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Embedding metadata (key -> scalar)
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Stored embedding record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embedding {
    /// Identifier, unique within the owning store
    pub id: String,

    /// Source text the vector represents
    pub text: String,

    /// Vector, `len == store.vector_dimension`
    pub vector: Vec<f32>,

    #[serde(default)]
    pub metadata: Metadata,

    /// Set on insertion
    pub timestamp: DateTime<Utc>,
}

/// Embedding as supplied by callers, before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmbedding {
    pub id: String,
    pub text: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl NewEmbedding {
    pub fn new(id: impl Into<String>, text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vector,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Vector store creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVectorStore {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub namespace: String,

    pub vector_dimension: usize,

    pub model: String,

    #[serde(default = "default_created_by")]
    pub created_by: String,

    /// Initial embeddings, validated like `add_embedding`
    #[serde(default)]
    pub embeddings: Vec<NewEmbedding>,
}

fn default_created_by() -> String {
    "system".to_string()
}

impl NewVectorStore {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        vector_dimension: usize,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            namespace: namespace.into(),
            vector_dimension,
            model: model.into(),
            created_by: default_created_by(),
            embeddings: Vec::new(),
        }
    }
}

/// Partial update of store descriptors
///
/// `vector_dimension` is accepted only when it equals the current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStoreUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub namespace: Option<String>,
    pub vector_dimension: Option<usize>,
    pub model: Option<String>,
}

/// Named collection of embeddings with a fixed dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStore {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub namespace: String,

    /// Fixed at creation
    pub vector_dimension: usize,

    /// Embedding model name (informational)
    pub model: String,

    /// Insertion order
    #[serde(default)]
    pub embeddings: Vec<Embedding>,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VectorStore {
    /// Create a store from a validated request, inserting any initial embeddings
    pub fn create(request: NewVectorStore) -> Result<Self> {
        let name = require_non_empty("name", &request.name)?;
        let namespace = require_non_empty("namespace", &request.namespace)?;
        let model = require_non_empty("model", &request.model)?;

        if request.vector_dimension == 0 {
            return Err(PromptVecError::invalid_input(
                "vectorDimension must be a positive integer",
            ));
        }

        let now = Utc::now();
        let mut store = Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: request.description,
            namespace,
            vector_dimension: request.vector_dimension,
            model,
            embeddings: Vec::with_capacity(request.embeddings.len()),
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
        };

        for embedding in request.embeddings {
            store.add_embedding(embedding)?;
        }

        Ok(store)
    }

    /// Fail with `DimensionMismatch` unless `len` equals the store dimension
    pub fn check_dimension(&self, len: usize) -> Result<()> {
        if len != self.vector_dimension {
            return Err(PromptVecError::dimension_mismatch(self.vector_dimension, len));
        }
        Ok(())
    }

    /// Append an embedding after validating it against the store
    pub fn add_embedding(&mut self, embedding: NewEmbedding) -> Result<&Embedding> {
        self.check_dimension(embedding.vector.len())?;

        if embedding.id.trim().is_empty() {
            return Err(PromptVecError::invalid_input("Embedding id cannot be empty"));
        }
        if embedding.text.trim().is_empty() {
            return Err(PromptVecError::invalid_input("Embedding text cannot be empty"));
        }
        ensure_finite(&embedding.vector)?;

        if self.get_embedding(&embedding.id).is_some() {
            return Err(PromptVecError::already_exists(format!(
                "Embedding {} in vector store {}",
                embedding.id, self.id
            )));
        }

        let now = Utc::now();
        self.embeddings.push(Embedding {
            id: embedding.id,
            text: embedding.text,
            vector: embedding.vector,
            metadata: embedding.metadata,
            timestamp: now,
        });
        self.updated_at = now;

        Ok(&self.embeddings[self.embeddings.len() - 1])
    }

    /// Remove an embedding by id, keeping the order of the rest
    pub fn remove_embedding(&mut self, embedding_id: &str) -> Result<Embedding> {
        let position = self
            .embeddings
            .iter()
            .position(|e| e.id == embedding_id)
            .ok_or_else(|| PromptVecError::not_found(format!("Embedding {}", embedding_id)))?;

        self.updated_at = Utc::now();
        Ok(self.embeddings.remove(position))
    }

    /// Apply descriptor changes; the dimension cannot change
    pub fn apply_update(&mut self, update: VectorStoreUpdate) -> Result<()> {
        if let Some(dimension) = update.vector_dimension {
            if dimension != self.vector_dimension {
                return Err(PromptVecError::invalid_input(format!(
                    "vectorDimension is immutable (current {}, requested {})",
                    self.vector_dimension, dimension
                )));
            }
        }

        // Validate everything before touching the store
        let name = update
            .name
            .as_deref()
            .map(|n| require_non_empty("name", n))
            .transpose()?;
        let namespace = update
            .namespace
            .as_deref()
            .map(|n| require_non_empty("namespace", n))
            .transpose()?;
        let model = update
            .model
            .as_deref()
            .map(|m| require_non_empty("model", m))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(namespace) = namespace {
            self.namespace = namespace;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(description) = update.description {
            self.description = description;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn get_embedding(&self, embedding_id: &str) -> Option<&Embedding> {
        self.embeddings.iter().find(|e| e.id == embedding_id)
    }

    pub fn count(&self) -> usize {
        self.embeddings.len()
    }
}

/// Reject NaN and infinite components
pub fn ensure_finite(vector: &[f32]) -> Result<()> {
    if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
        return Err(PromptVecError::invalid_input(format!(
            "Vector component {} is not a finite number",
            index
        )));
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PromptVecError::invalid_input(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_dimension(dimension: usize) -> VectorStore {
        VectorStore::create(NewVectorStore::new("docs", "default", dimension, "nomic-embed-text"))
            .unwrap()
    }

    #[test]
    fn test_create_trims_and_defaults() {
        let mut request = NewVectorStore::new("  docs ", " team-a ", 3, "model");
        request.description = "FAQ passages".to_string();
        let store = VectorStore::create(request).unwrap();

        assert_eq!(store.name, "docs");
        assert_eq!(store.namespace, "team-a");
        assert_eq!(store.created_by, "system");
        assert_eq!(store.count(), 0);
        assert_eq!(store.created_at, store.updated_at);
    }

    #[test]
    fn test_create_rejects_zero_dimension() {
        let err = VectorStore::create(NewVectorStore::new("docs", "default", 0, "model")).unwrap_err();
        assert!(matches!(err, PromptVecError::InvalidInput(_)));
    }

    #[test]
    fn test_create_validates_initial_embeddings() {
        let mut request = NewVectorStore::new("docs", "default", 2, "model");
        request.embeddings = vec![
            NewEmbedding::new("a", "alpha", vec![1.0, 0.0]),
            NewEmbedding::new("b", "beta", vec![1.0, 0.0, 0.0]),
        ];

        let err = VectorStore::create(request).unwrap_err();
        assert!(matches!(
            err,
            PromptVecError::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn test_add_embedding_dimension_mismatch() {
        let mut store = store_with_dimension(3);
        let err = store
            .add_embedding(NewEmbedding::new("a", "alpha", vec![1.0, 0.0]))
            .unwrap_err();

        assert!(matches!(
            err,
            PromptVecError::DimensionMismatch { expected: 3, actual: 2 }
        ));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_add_embedding_rejects_duplicates_and_bad_values() {
        let mut store = store_with_dimension(2);
        store
            .add_embedding(NewEmbedding::new("a", "alpha", vec![1.0, 0.0]))
            .unwrap();

        let duplicate = store.add_embedding(NewEmbedding::new("a", "again", vec![0.0, 1.0]));
        assert!(matches!(duplicate, Err(PromptVecError::AlreadyExists(_))));

        let empty_text = store.add_embedding(NewEmbedding::new("b", "  ", vec![0.0, 1.0]));
        assert!(matches!(empty_text, Err(PromptVecError::InvalidInput(_))));

        let nan = store.add_embedding(NewEmbedding::new("c", "gamma", vec![f32::NAN, 1.0]));
        assert!(matches!(nan, Err(PromptVecError::InvalidInput(_))));

        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_remove_embedding_preserves_order() {
        let mut store = store_with_dimension(1);
        for id in ["a", "b", "c", "d"] {
            store.add_embedding(NewEmbedding::new(id, id, vec![1.0])).unwrap();
        }

        let removed = store.remove_embedding("b").unwrap();
        assert_eq!(removed.id, "b");

        let ids: Vec<&str> = store.embeddings.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_missing_embedding() {
        let mut store = store_with_dimension(1);
        let err = store.remove_embedding("missing").unwrap_err();
        assert!(matches!(err, PromptVecError::NotFound(_)));
    }

    #[test]
    fn test_apply_update_keeps_dimension() {
        let mut store = store_with_dimension(3);

        let err = store
            .apply_update(VectorStoreUpdate {
                name: Some("renamed".to_string()),
                vector_dimension: Some(4),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, PromptVecError::InvalidInput(_)));
        assert_eq!(store.name, "docs");

        store
            .apply_update(VectorStoreUpdate {
                name: Some("renamed".to_string()),
                description: Some(String::new()),
                vector_dimension: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.name, "renamed");
        assert_eq!(store.vector_dimension, 3);
    }

    #[test]
    fn test_metadata_accepts_scalars_only() {
        let embedding: NewEmbedding = serde_json::from_str(
            r#"{"id":"a","text":"alpha","vector":[1.0],"metadata":{"category":"x","rank":2,"public":true}}"#,
        )
        .unwrap();
        assert_eq!(embedding.metadata["category"], MetadataValue::from("x"));
        assert_eq!(embedding.metadata["rank"], MetadataValue::Number(2.0));
        assert_eq!(embedding.metadata["public"], MetadataValue::Bool(true));

        let nested = serde_json::from_str::<NewEmbedding>(
            r#"{"id":"a","text":"alpha","vector":[1.0],"metadata":{"tags":["x","y"]}}"#,
        );
        assert!(nested.is_err());
    }

    #[test]
    fn test_store_serializes_camel_case() {
        let store = store_with_dimension(3);
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["vectorDimension"], 3);
        assert_eq!(json["createdBy"], "system");
        assert!(json.get("createdAt").is_some());
    }
}
