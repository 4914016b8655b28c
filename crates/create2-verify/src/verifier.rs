//! The deployment verifier.
//!
//! Verification is an ordered pipeline. Every stage hands its output to the next one
//! explicitly:
//!
//! 1. **digest**: `keccak256(init_code)`
//! 2. **predict**: [`derive_address`] over (deployer, salt, digest)
//! 3. **pre-check**: refuse to deploy onto an address that already holds code or has a
//!    non-zero nonce
//! 4. **deploy**: through the [`ChainBackend`], bounded by the optional deadline
//! 5. **compare**: predicted vs actual, producing a [`VerificationResult`]
//!
//! A rejected deployment is followed by an occupancy re-check. Concurrent attempts for the
//! same address race on the chain, and the losers observe an occupied address after their
//! deployment fails; those are reported as [`VerifyError::DeploymentConflict`] rather than
//! as a plain backend error.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256};
use tracing::{debug, warn};

use crate::{derive_address, init_code_hash, ChainBackend, VerificationResult, VerifyError};

/// Verifies that deployments land at their derived address.
#[derive(Debug, Clone)]
pub struct DeploymentVerifier<B> {
    backend: B,
    deployer: Address,
    deadline: Option<Duration>,
}

impl<B: ChainBackend> DeploymentVerifier<B> {
    /// Creates a verifier that assumes the backend's own deployer identity.
    pub fn new(backend: B) -> Self {
        let deployer = backend.deployer();
        Self { backend, deployer, deadline: None }
    }

    /// Overrides the deployer identity used for prediction.
    ///
    /// Predictions made with an identity other than the backend's deployer will not match
    /// and are reported as mismatches.
    pub fn with_deployer(mut self, deployer: Address) -> Self {
        self.deployer = deployer;
        self
    }

    /// Bounds every deployment by `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The deployer identity predictions are made for.
    pub const fn deployer(&self) -> Address {
        self.deployer
    }

    /// The deployment deadline, if any.
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Predicts the address `init_code` will be deployed at under `salt`.
    pub fn predict(&self, salt: B256, init_code: &[u8]) -> Address {
        derive_address(self.deployer, salt, init_code_hash(init_code))
    }

    /// Runs the full pipeline for one deployment.
    ///
    /// Returns `Ok` once the comparison stage is reached, whether or not the addresses
    /// match; use [`VerificationResult::into_result`] to treat a mismatch as an error.
    /// Every earlier failure is returned as a distinct [`VerifyError`] variant.
    pub async fn verify(
        &self,
        salt: B256,
        init_code: Bytes,
    ) -> Result<VerificationResult, VerifyError> {
        let digest = init_code_hash(&init_code);
        let predicted = derive_address(self.deployer, salt, digest);
        debug!(target: "create2::verifier", deployer = %self.deployer, %salt, %digest, %predicted, "Predicted deployment address");

        if self.is_occupied(predicted).await? {
            warn!(target: "create2::verifier", address = %predicted, "Predicted address is already occupied");
            return Err(VerifyError::DeploymentConflict { address: predicted });
        }

        let actual = match self.deploy(salt, init_code).await {
            Ok(actual) => actual,
            Err(VerifyError::Chain(err)) => {
                // The address may have been taken by a concurrent deployment.
                match self.is_occupied(predicted).await {
                    Ok(true) => {
                        warn!(target: "create2::verifier", address = %predicted, %err, "Deployment lost the race for its address");
                        return Err(VerifyError::DeploymentConflict { address: predicted });
                    }
                    Ok(false) => {}
                    Err(recheck) => {
                        warn!(target: "create2::verifier", address = %predicted, %recheck, "Occupancy re-check failed after rejected deployment");
                    }
                }
                return Err(err.into());
            }
            Err(err) => return Err(err),
        };
        debug!(target: "create2::verifier", %actual, "Deployment finalized");

        let result = VerificationResult::new(self.deployer, salt, digest, predicted, actual);
        if !result.is_match() {
            warn!(target: "create2::verifier", %predicted, %actual, "Deployment landed at an unexpected address");
        }
        Ok(result)
    }

    /// Reports whether the predicted address of `init_code` under `salt` is already occupied.
    ///
    /// Callers recovering from [`VerifyError::DeploymentTimeout`] check this before retrying,
    /// since the timed-out deployment may have landed.
    pub async fn is_deployed(&self, salt: B256, init_code: &[u8]) -> Result<bool, VerifyError> {
        self.is_occupied(self.predict(salt, init_code)).await
    }

    /// An address is occupied when it holds code or its nonce is non-zero. The chain refuses
    /// `CREATE2` onto either (EIP-684), so a constructor that installs no code still claims it.
    async fn is_occupied(&self, address: Address) -> Result<bool, VerifyError> {
        if !self.backend.code_at(address).await?.is_empty() {
            return Ok(true);
        }
        Ok(self.backend.nonce_at(address).await? != 0)
    }

    async fn deploy(&self, salt: B256, init_code: Bytes) -> Result<Address, VerifyError> {
        let deployment = self.backend.deploy(salt, init_code);
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, deployment)
                .await
                .map_err(|_| VerifyError::DeploymentTimeout { deadline })?
                .map_err(Into::into),
            None => deployment.await.map_err(Into::into),
        }
    }
}
