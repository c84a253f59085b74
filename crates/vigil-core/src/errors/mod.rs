pub mod catalog_error;
pub mod evaluate_error;

pub use catalog_error::CatalogError;
pub use evaluate_error::EvaluateError;

/// Top-level error type for the Vigil engine.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Evaluate(#[from] EvaluateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience result alias used across the workspace.
pub type VigilResult<T> = Result<T, VigilError>;
