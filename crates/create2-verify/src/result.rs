//! The record a verification attempt produces once it reaches the comparison stage.
//!
//! A mismatch is data, not an error: callers that treat it as fatal opt in with
//! [`VerificationResult::into_result`].
//!
//! ```
//! use alloy_primitives::{address, B256};
//! use create2_verify::{FailureKind, VerificationResult};
//!
//! let predicted = address!("1111111111111111111111111111111111111111");
//! let actual = address!("2222222222222222222222222222222222222222");
//! let result = VerificationResult::new(predicted, B256::ZERO, B256::ZERO, predicted, actual);
//!
//! assert_eq!(result.failure(), Some(FailureKind::AddressMismatch));
//! assert_eq!(result.into_result().unwrap_err().kind(), FailureKind::AddressMismatch);
//! ```

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::{FailureKind, VerifyError};

/// Outcome of one verification attempt that reached the comparison stage.
///
/// Immutable once produced. `failure` is set exactly when the addresses disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    deployer: Address,
    salt: B256,
    init_code_hash: B256,
    predicted: Address,
    actual: Address,
    matched: bool,
    failure: Option<FailureKind>,
}

impl VerificationResult {
    /// Compares `predicted` against `actual` and records the outcome.
    pub fn new(
        deployer: Address,
        salt: B256,
        init_code_hash: B256,
        predicted: Address,
        actual: Address,
    ) -> Self {
        let matched = predicted == actual;
        Self {
            deployer,
            salt,
            init_code_hash,
            predicted,
            actual,
            matched,
            failure: (!matched).then_some(FailureKind::AddressMismatch),
        }
    }

    /// The deployer identity the prediction assumed.
    pub const fn deployer(&self) -> Address {
        self.deployer
    }

    /// The salt of the attempt.
    pub const fn salt(&self) -> B256 {
        self.salt
    }

    /// Digest of the deployed init code.
    pub const fn init_code_hash(&self) -> B256 {
        self.init_code_hash
    }

    /// The derived address.
    pub const fn predicted(&self) -> Address {
        self.predicted
    }

    /// The address the chain created.
    pub const fn actual(&self) -> Address {
        self.actual
    }

    /// Whether predicted and actual addresses are byte-identical.
    pub const fn is_match(&self) -> bool {
        self.matched
    }

    /// The failure class, if any.
    pub const fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Turns a mismatch into [`VerifyError::AddressMismatch`].
    pub fn into_result(self) -> Result<Self, VerifyError> {
        if self.matched {
            Ok(self)
        } else {
            Err(VerifyError::AddressMismatch { predicted: self.predicted, actual: self.actual })
        }
    }
}
