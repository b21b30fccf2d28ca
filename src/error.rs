//! Error types for the network, its layers and the input providers.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, NnError>;

#[derive(Debug, Error)]
pub enum NnError {
    /// Array dimensions disagree with what a layer or loss expects.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `backward` was called on a layer that has not run `forward` yet.
    #[error("Layer '{layer}' has no cached forward pass; call forward before backward")]
    UninitializedState { layer: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed PDB record at line {line}: {message}")]
    Pdb { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> NnError {
        NnError::ShapeMismatch { context, expected, actual }
    }
}

/// Fails with `ShapeMismatch` unless `actual == expected`.
pub(crate) fn ensure_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NnError::shape(context, expected, actual))
    }
}
