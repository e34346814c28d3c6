/// PromptVec error types
#[derive(Debug, thiserror::Error)]
pub enum PromptVecError {
    /// Vector length disagrees with the store's fixed dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Referenced vector store does not exist
    #[error("Vector store not found: {0}")]
    StoreNotFound(String),

    /// Referenced embedding (or other record) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record with the same identifier already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage collaborator failed to read or write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptVecError {
    /// Create dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create store not found error
    pub fn store_not_found<S: Into<String>>(store_id: S) -> Self {
        Self::StoreNotFound(store_id.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create already exists error
    pub fn already_exists<S: Into<String>>(msg: S) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Create persistence error
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<config::ConfigError> for PromptVecError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl PromptVecError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DimensionMismatch { .. } => 400,
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::StoreNotFound(_) => 404,
            Self::NotFound(_) => 404,
            Self::AlreadyExists(_) => 409,
            Self::Persistence(_) => 500,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
