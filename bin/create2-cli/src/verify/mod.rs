//! Deployment verification against a fresh development chain
//!
//! Runs the full predict, deploy and compare pipeline through the chain's `CREATE2`
//! factory.

mod cmd;

pub use cmd::*;
