//! Parsing of the derivation inputs given on the command line.

use alloy_primitives::{Address, Bytes, B256, U256};
use clap::Args;
use create2_devchain::simple_storage_init_code;
use create2_verify::InputField;

use super::{decode_hex, load_hex, CliError, Result};

/// Init code source
#[derive(Args, Debug, Clone, Default)]
pub struct InitCodeArgs {
    /// Init code as hex string
    #[arg(long = "init-code", conflicts_with = "init_code_file")]
    pub init_code: Option<String>,

    /// File containing init code as hex. If '-' is specified, it is read from stdin
    #[arg(long = "init-code-file")]
    pub init_code_file: Option<String>,
}

impl InitCodeArgs {
    /// Loads the init code, `None` if no source was given.
    pub fn load(&self) -> Result<Option<Bytes>> {
        load_hex(self.init_code.as_deref(), self.init_code_file.as_deref())
    }

    /// Loads the init code, falling back to the single-slot storage contract.
    pub fn load_or_storage_contract(&self) -> Result<Bytes> {
        Ok(self.load()?.unwrap_or_else(simple_storage_init_code))
    }
}

/// Parses a salt given either as a decimal integer or as 32 bytes of hex.
///
/// Decimal salts are widened to `bytes32(uint256(n))`. Hex salts must be exactly 32 bytes.
pub fn parse_salt(s: &str) -> Result<B256> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        let bytes = decode_hex(s)?;
        InputField::Salt.check(&bytes)?;
        return Ok(B256::from_slice(&bytes));
    }

    let value = U256::from_str_radix(s, 10)
        .map_err(|err| CliError::InvalidInput(format!("Invalid salt {s:?}: {err}")))?;
    Ok(B256::from(value))
}

/// Parses a 20-byte hex deployer identity.
pub fn parse_deployer(s: &str) -> Result<Address> {
    let bytes = decode_hex(s)?;
    InputField::Deployer.check(&bytes)?;
    Ok(Address::from_slice(&bytes))
}
