//! Command-line interface for deterministic `CREATE2` deployments.
//!
//! `create2 predict` derives an address offline. `create2 verify` deploys through the
//! `CREATE2` factory of an in-process development chain and checks the chain agrees.

mod cmd;
pub use cmd::*;

pub mod common;
pub mod predict;
pub mod verify;
