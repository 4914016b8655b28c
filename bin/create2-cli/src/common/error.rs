use alloy_primitives::hex::FromHexError;
use create2_verify::{transcript::TranscriptError, ChainError, DeriveError, VerifyError};

/// Error types shared by the `create2` commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Failed to read file
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Invalid hex string
    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] FromHexError),

    /// Input of the wrong width
    #[error("{0}")]
    InvalidLength(#[from] DeriveError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The development chain could not be set up
    #[error("Development chain error: {0}")]
    Chain(#[from] ChainError),

    /// Verification failed
    #[error("Verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// Transcript could not be written
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Output could not be encoded
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for the `create2` commands
pub type Result<T> = std::result::Result<T, CliError>;
