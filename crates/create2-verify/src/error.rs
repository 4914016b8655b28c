//! Error types for derivation, chain interaction and verification.

use std::time::Duration;

use alloy_primitives::{Address, Bytes};

use crate::InputField;

/// Error returned by the checked derivation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    /// An argument does not have its fixed byte width.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidInputLength {
        /// The offending argument.
        field: InputField,
        /// The required width.
        expected: usize,
        /// The width supplied.
        actual: usize,
    },
}

/// Error reported by a chain backend.
///
/// The verifier never reinterprets these, except that a rejected deployment whose target
/// address turns out to be occupied is reported as [`VerifyError::DeploymentConflict`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The deployment transaction reverted.
    #[error("deployment reverted with output {output}")]
    Reverted {
        /// Revert data returned by the deployer.
        output: Bytes,
    },
    /// The deployment transaction halted (out of gas, invalid opcode, ...).
    #[error("deployment halted: {reason}")]
    Halted {
        /// Human readable halt reason.
        reason: String,
    },
    /// The deployer returned data that is not a 20-byte address.
    #[error("deployer returned malformed address data {0}")]
    MalformedOutput(Bytes),
    /// The transaction failed validation and was never executed.
    #[error("invalid transaction: {0}")]
    Invalid(String),
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend's local state is unusable.
    #[error("chain state error: {0}")]
    State(String),
}

/// The class of a verification failure.
///
/// Tests and transcripts assert on this rather than on error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed fixed-width input.
    InvalidInputLength,
    /// The predicted address is already occupied.
    DeploymentConflict,
    /// The deployment did not finalize within the deadline.
    DeploymentTimeout,
    /// Predicted and actual addresses disagree.
    AddressMismatch,
    /// Any other error reported by the chain backend.
    Chain,
}

/// Error returned by the deployment verifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Malformed input. Always a caller bug.
    #[error(transparent)]
    InvalidInput(#[from] DeriveError),
    /// A contract already occupies the predicted address. Choose another salt.
    #[error("deployment conflict: address {address} is already occupied")]
    DeploymentConflict {
        /// The occupied address.
        address: Address,
    },
    /// The backend did not finalize the deployment within the deadline.
    ///
    /// The deployment may still have landed: re-check occupancy before retrying with the
    /// same salt.
    #[error("deployment did not finalize within {deadline:?}")]
    DeploymentTimeout {
        /// The deadline that was exhausted.
        deadline: Duration,
    },
    /// The chain created the contract somewhere other than predicted.
    #[error("address mismatch: predicted {predicted}, chain created {actual}")]
    AddressMismatch {
        /// The derived address.
        predicted: Address,
        /// The address reported by the chain.
        actual: Address,
    },
    /// A backend error, passed through unchanged.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl VerifyError {
    /// Returns the failure class of this error.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput(DeriveError::InvalidInputLength { .. }) => {
                FailureKind::InvalidInputLength
            }
            Self::DeploymentConflict { .. } => FailureKind::DeploymentConflict,
            Self::DeploymentTimeout { .. } => FailureKind::DeploymentTimeout,
            Self::AddressMismatch { .. } => FailureKind::AddressMismatch,
            Self::Chain(_) => FailureKind::Chain,
        }
    }
}
