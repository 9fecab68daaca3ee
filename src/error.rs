use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Taxonomy file not found: {0}")]
    TaxonomyNotFound(String),
}
