//! Tracing setup for the `create2` commands.
//!
//! Library events are emitted under `create2::verifier`, `create2::devchain` and
//! `create2::cli`. Nothing is printed unless `-v` or `RUST_LOG` asks for it, so the
//! command output on stdout stays machine readable.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use super::{CliError, Result};

/// Logging flags shared by every subcommand.
#[derive(Debug, Clone, Default, Parser)]
pub struct LogArgs {
    /// Verbosity: -v errors, -vv warnings, -vvv outcomes, -vvvv pipeline stages, -vvvvv every
    /// transaction on the development chain
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long = "log.file", visible_aliases = ["log-file"], global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable ANSI colors on stderr. Log files are always plain
    #[arg(long = "log.no-color", visible_aliases = ["log-no-color"], global = true)]
    pub log_no_color: bool,
}

impl LogArgs {
    /// The level selected by `-v`, `None` when logging is off.
    pub const fn level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::ERROR),
            2 => Some(Level::WARN),
            3 => Some(Level::INFO),
            4 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }

    /// The filter directive for the selected level. `RUST_LOG` takes precedence at
    /// [`init`](Self::init) time.
    pub fn directive(&self) -> String {
        // Prefix match: covers the `create2_*` crates and the `create2::*` event targets.
        self.level().map_or_else(|| "off".to_string(), |level| format!("create2={level}"))
    }

    /// Installs the global subscriber. Event targets are shown from `-vvvv` on.
    ///
    /// Fails if the log file cannot be created or a subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.directive())
        };
        let show_target = self.verbose >= 4;

        let installed = match &self.log_file {
            Some(path) => fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::fs::File::create(path)?)
                .with_ansi(false)
                .try_init(),
            None => fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .with_ansi(!self.log_no_color)
                .try_init(),
        };
        installed.map_err(|err| CliError::Logging(err.to_string()))
    }
}
