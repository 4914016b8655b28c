//! Differential verification across several chain backends.
//!
//! The same deployment is sent to every client in turn. The first client is the primary:
//! every other client must create the contract too, at the same address.

use alloy_primitives::{Address, Bytes, B256};
use tracing::warn;

use crate::{ChainBackend, DeploymentVerifier, VerificationResult, VerifyError};

/// How a client's outcome departs from the primary's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// The primary created a contract, this client did not.
    NotCreated {
        /// The client's label.
        client: String,
        /// What the client reported instead.
        error: VerifyError,
    },
    /// The client created the contract somewhere else.
    Address {
        /// The client's label.
        client: String,
        /// Where the primary created it.
        expected: Address,
        /// Where this client created it.
        actual: Address,
    },
}

/// Per-client outcomes of one differential attempt.
#[derive(Debug)]
pub struct DifferentialReport {
    outcomes: Vec<(String, Result<VerificationResult, VerifyError>)>,
}

impl DifferentialReport {
    /// Outcomes in client order, the primary first.
    pub fn outcomes(&self) -> &[(String, Result<VerificationResult, VerifyError>)] {
        &self.outcomes
    }

    /// Differences between each secondary client and the primary.
    ///
    /// Empty when the primary itself failed, since there is nothing to compare against.
    pub fn divergences(&self) -> Vec<Divergence> {
        let Some((_, Ok(primary))) = self.outcomes.first() else { return Vec::new() };

        self.outcomes
            .iter()
            .skip(1)
            .filter_map(|(client, outcome)| match outcome {
                Ok(result) if result.actual() == primary.actual() => None,
                Ok(result) => Some(Divergence::Address {
                    client: client.clone(),
                    expected: primary.actual(),
                    actual: result.actual(),
                }),
                Err(error) => {
                    Some(Divergence::NotCreated { client: client.clone(), error: error.clone() })
                }
            })
            .collect()
    }

    /// Whether every client verified and all agree on the created address.
    pub fn agreed(&self) -> bool {
        !self.outcomes.is_empty()
            && self.outcomes.iter().all(|(_, outcome)| outcome.as_ref().is_ok_and(|r| r.is_match()))
            && self.divergences().is_empty()
    }
}

/// Runs one deployment against several clients.
#[derive(Debug, Default)]
pub struct DifferentialVerifier<B> {
    clients: Vec<(String, DeploymentVerifier<B>)>,
}

impl<B: ChainBackend> DifferentialVerifier<B> {
    /// Creates a verifier with no clients.
    pub fn new() -> Self {
        Self { clients: Vec::new() }
    }

    /// Adds a client. The first client added is the primary.
    pub fn with_client(mut self, label: impl Into<String>, verifier: DeploymentVerifier<B>) -> Self {
        self.clients.push((label.into(), verifier));
        self
    }

    /// Number of clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client has been added.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Verifies `init_code` under `salt` on every client.
    pub async fn verify(&self, salt: B256, init_code: Bytes) -> DifferentialReport {
        let mut outcomes = Vec::with_capacity(self.clients.len());
        for (label, verifier) in &self.clients {
            let outcome = verifier.verify(salt, init_code.clone()).await;
            outcomes.push((label.clone(), outcome));
        }

        let report = DifferentialReport { outcomes };
        for divergence in report.divergences() {
            warn!(target: "create2::differential", ?divergence, "Clients disagree on deployment");
        }
        report
    }
}
