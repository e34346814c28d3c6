pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, StorageKind};
pub use error::PromptVecError;
pub type Result<T> = std::result::Result<T, PromptVecError>;
