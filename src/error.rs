use thiserror::Error;

/// Failures of the key-value storage backing the interest store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Listing {0} appears more than once in the catalogue")]
    DuplicateListing(u32),

    #[error("Listing ids must be positive")]
    ZeroId,
}

/// Failures reading listings from an external data source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source returned status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Failures of a generative-AI flow
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Generation backend unavailable: {0}")]
    Backend(String),

    #[error("Generation backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Backend(err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type SourceResult<T> = Result<T, SourceError>;
pub type GenerationResult<T> = Result<T, GenerationError>;
