//! An in-process EVM development chain for exercising deterministic deployments.
//!
//! [`DevChain`] runs revm over an in-memory state with the canonical `CREATE2` factory
//! installed, and implements [`create2_verify::ChainBackend`] so a
//! [`create2_verify::DeploymentVerifier`] can drive real deployments against it.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod bytecode;
pub use bytecode::*;

mod chain;
pub use chain::*;

mod contracts;
pub use contracts::*;

mod database;
pub use database::*;
