//! Test utilities for deployment verification.

mod mock;

pub use mock::*;
