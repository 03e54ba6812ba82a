//! Error handling for the repository copy workflow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    /// A raw `repository:tag` string without any colon
    #[error("Invalid tag name: {0}")]
    InvalidReference(String),
    /// A record in the push response stream carried an `error` field
    #[error("Pushing to registry raised an error: {record}")]
    RegistryPush { record: serde_json::Value },
    #[error("Docker error: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("Engine error: {0}")]
    Engine(String),
    #[error("Interrupted before the copy finished")]
    Interrupted,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to remove {} local tag(s) ({}): {first_error}", .tags.len(), .tags.join(", "))]
    Cleanup {
        tags: Vec<String>,
        first_error: String,
    },
}

pub type Result<T> = std::result::Result<T, CopyError>;
