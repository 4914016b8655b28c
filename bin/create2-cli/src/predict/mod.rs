//! Offline address prediction
//!
//! Hashes the init code and derives the address it lands at under a deployer and salt.
//! Nothing is deployed.

mod cmd;

pub use cmd::*;
