//! Helpers shared by the `create2` commands.

mod error;
mod hex;
mod input;
mod logging;

pub use error::*;
pub use hex::*;
pub use input::*;
pub use logging::*;
