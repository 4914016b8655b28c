use std::{path::PathBuf, time::Duration};

use clap::Parser;
use create2_devchain::DevChain;
use create2_verify::{
    init_code_hash,
    transcript::{Transcript, TranscriptOutcome},
    DeploymentVerifier, VerificationResult, VerifyError,
};
use tracing::info;

use crate::common::{parse_deployer, parse_salt, InitCodeArgs, LogArgs, Result};

/// Deploy through the `CREATE2` factory of a fresh development chain and check the address
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Salt as a decimal integer or 32 bytes of hex
    #[arg(long = "salt")]
    pub salt: String,

    /// Init code to deploy. Defaults to the single-slot storage contract
    #[command(flatten)]
    pub init_code: InitCodeArgs,

    /// Deployer identity to predict with. Defaults to the factory address; any other value
    /// yields a mismatch
    #[arg(long = "deployer", env = "CREATE2_DEPLOYER")]
    pub deployer: Option<String>,

    /// Deadline for the deployment in milliseconds. The development chain finalizes
    /// deployments synchronously, so against it the deadline never elapses
    #[arg(long = "timeout", env = "CREATE2_TIMEOUT_MS")]
    pub timeout: Option<u64>,

    /// Write the attempt to this JSON-lines transcript
    #[arg(long = "transcript")]
    pub transcript: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cmd {
    /// Run the verification and return its outcome without printing it.
    ///
    /// The outer error covers argument and setup failures; the inner result is the
    /// verification outcome itself.
    pub async fn verify(&self) -> Result<std::result::Result<VerificationResult, VerifyError>> {
        let salt = parse_salt(&self.salt)?;
        let init_code = self.init_code.load_or_storage_contract()?;
        let digest = init_code_hash(&init_code);

        let chain = DevChain::new()?;
        let mut verifier = DeploymentVerifier::new(&chain);
        if let Some(deployer) = &self.deployer {
            verifier = verifier.with_deployer(parse_deployer(deployer)?);
        }
        if let Some(timeout) = self.timeout {
            verifier = verifier.with_deadline(Duration::from_millis(timeout));
        }

        let outcome = verifier.verify(salt, init_code).await;
        info!(target: "create2::cli", %salt, %digest, ok = outcome.is_ok(), "Verification finished");

        if let Some(path) = &self.transcript {
            Transcript::create(path)?.record(salt, digest, &outcome)?;
        }
        Ok(outcome)
    }

    /// Execute the verify command. Fails on any verification failure, including a mismatch.
    pub async fn run(&self) -> Result<()> {
        let outcome = self.verify().await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&TranscriptOutcome::from(&outcome))?);
        } else if let Ok(result) = &outcome {
            println!("Deployer:       {}", result.deployer());
            println!("Salt:           {}", result.salt());
            println!("Init code hash: {}", result.init_code_hash());
            println!("Predicted:      {}", result.predicted());
            println!("Actual:         {}", result.actual());
            println!("Match:          {}", result.is_match());
        }

        outcome?.into_result()?;
        Ok(())
    }
}
