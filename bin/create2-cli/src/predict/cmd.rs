use alloy_primitives::{Address, B256};
use clap::Parser;
use create2_verify::{derive, init_code_hash};
use serde::Serialize;

use crate::common::{parse_deployer, parse_salt, CliError, InitCodeArgs, LogArgs, Result};

/// Predict the address of a deterministic deployment
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Address of the contract executing `CREATE2`
    #[arg(
        long = "deployer",
        env = "CREATE2_DEPLOYER",
        default_value = "0x4e59b44847b379578588920ca78fbf26c0b4956c"
    )]
    pub deployer: String,

    /// Salt as a decimal integer or 32 bytes of hex
    #[arg(long = "salt")]
    pub salt: String,

    /// Init code to predict for
    #[command(flatten)]
    pub init_code: InitCodeArgs,

    /// Print the prediction as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

/// A predicted deployment address together with its inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    /// Deployer identity
    pub deployer: Address,
    /// Salt
    pub salt: B256,
    /// Digest of the init code
    pub init_code_hash: B256,
    /// Derived address
    pub predicted: Address,
}

impl Cmd {
    /// Compute the prediction without printing it
    pub fn predict(&self) -> Result<Prediction> {
        let deployer = parse_deployer(&self.deployer)?;
        let salt = parse_salt(&self.salt)?;
        let init_code = self.init_code.load()?.ok_or_else(|| {
            CliError::InvalidInput("one of --init-code or --init-code-file is required".into())
        })?;

        let init_code_hash = init_code_hash(&init_code);
        let predicted = derive(deployer.as_slice(), salt.as_slice(), init_code_hash.as_slice())?;
        Ok(Prediction { deployer, salt, init_code_hash, predicted })
    }

    /// Execute the predict command
    pub fn run(&self) -> Result<()> {
        let prediction = self.predict()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        } else {
            println!("Deployer:       {}", prediction.deployer);
            println!("Salt:           {}", prediction.salt);
            println!("Init code hash: {}", prediction.init_code_hash);
            println!("Predicted:      {}", prediction.predicted);
        }
        Ok(())
    }
}
