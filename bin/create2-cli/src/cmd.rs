use clap::Parser;

use crate::common::{LogArgs, Result};

/// Main command enumeration for the `create2` CLI
#[derive(Parser, Debug)]
#[command(name = "create2", infer_subcommands = true, version)]
pub enum MainCmd {
    /// Predict a deterministic deployment address
    Predict(crate::predict::Cmd),
    /// Deploy on a development chain and verify the address
    Verify(crate::verify::Cmd),
}

impl MainCmd {
    /// Logging configuration of the selected command
    pub const fn log_args(&self) -> &LogArgs {
        match self {
            Self::Predict(cmd) => &cmd.log_args,
            Self::Verify(cmd) => &cmd.log_args,
        }
    }

    /// Execute the main command
    pub async fn run(&self) -> Result<()> {
        match self {
            Self::Predict(cmd) => cmd.run(),
            Self::Verify(cmd) => cmd.run().await,
        }
    }
}
