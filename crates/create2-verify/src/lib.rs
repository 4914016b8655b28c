//! Deterministic deployment address derivation and verification.
//!
//! [`derive_address`] computes where a `CREATE2` deployment lands. [`DeploymentVerifier`]
//! sends a deployment through a [`ChainBackend`] and checks that the chain agrees.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod backend;
pub use backend::*;

mod derive;
pub use derive::*;

pub mod differential;

mod error;
pub use error::*;

mod result;
pub use result::*;

pub mod transcript;

mod verifier;
pub use verifier::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
