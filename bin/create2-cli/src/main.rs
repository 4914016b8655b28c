//! `create2` CLI entry point

use std::process::ExitCode;

use clap::Parser;
use create2_cli::MainCmd;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cmd = MainCmd::parse();
    if let Err(err) = cmd.log_args().init() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
