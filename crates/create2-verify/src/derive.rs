//! Deterministic deployment address derivation (EIP-1014).
//!
//! The address a `CREATE2` deployment lands at is a pure function of three values:
//!
//! ```text
//! address = keccak256(0xff ‖ deployer ‖ salt ‖ keccak256(init_code))[12..32]
//! ```
//!
//! The leading `0xff` byte keeps the preimage disjoint from the RLP preimage used by
//! `CREATE` (`keccak256(rlp([sender, nonce]))`), so the two schemes never collide.

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::DeriveError;

/// Domain-separation prefix mixed into every derivation preimage.
pub const CREATE2_PREFIX: u8 = 0xff;

/// Byte width of a deployer identity.
pub const DEPLOYER_LEN: usize = 20;

/// Byte width of a salt.
pub const SALT_LEN: usize = 32;

/// Byte width of an init code digest.
pub const INIT_CODE_HASH_LEN: usize = 32;

const PREIMAGE_LEN: usize = 1 + DEPLOYER_LEN + SALT_LEN + INIT_CODE_HASH_LEN;

/// The input a derivation argument was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    /// The deployer identity.
    Deployer,
    /// The salt.
    Salt,
    /// The init code digest.
    InitCodeHash,
}

impl InputField {
    /// The fixed byte width this field must have.
    pub const fn expected_len(self) -> usize {
        match self {
            Self::Deployer => DEPLOYER_LEN,
            Self::Salt => SALT_LEN,
            Self::InitCodeHash => INIT_CODE_HASH_LEN,
        }
    }

    /// Checks the width of `bytes` against this field.
    pub fn check(self, bytes: &[u8]) -> Result<(), DeriveError> {
        let expected = self.expected_len();
        if bytes.len() == expected {
            Ok(())
        } else {
            Err(DeriveError::InvalidInputLength { field: self, expected, actual: bytes.len() })
        }
    }
}

impl core::fmt::Display for InputField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deployer => f.write_str("deployer"),
            Self::Salt => f.write_str("salt"),
            Self::InitCodeHash => f.write_str("init code hash"),
        }
    }
}

/// Derives the deployment address from raw byte slices.
///
/// This is the checked entry point for callers holding untyped input (hex from a command
/// line, bytes off the wire). Each argument must have its fixed width, otherwise
/// [`DeriveError::InvalidInputLength`] names the first offending field.
pub fn derive(deployer: &[u8], salt: &[u8], init_code_hash: &[u8]) -> Result<Address, DeriveError> {
    InputField::Deployer.check(deployer)?;
    InputField::Salt.check(salt)?;
    InputField::InitCodeHash.check(init_code_hash)?;

    Ok(derive_address(
        Address::from_slice(deployer),
        B256::from_slice(salt),
        B256::from_slice(init_code_hash),
    ))
}

/// Derives the deployment address from typed inputs. Total: never fails.
pub fn derive_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    let mut preimage = [0u8; PREIMAGE_LEN];
    preimage[0] = CREATE2_PREFIX;
    preimage[1..21].copy_from_slice(deployer.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..].copy_from_slice(init_code_hash.as_slice());

    let hash = keccak256(preimage);
    Address::from_slice(&hash[12..])
}

/// Computes the init code digest that enters the derivation.
#[inline]
pub fn init_code_hash(init_code: &[u8]) -> B256 {
    keccak256(init_code)
}

/// Hashes `init_code` and derives the address it would be deployed at.
pub fn predict_address(deployer: Address, salt: B256, init_code: &[u8]) -> Address {
    derive_address(deployer, salt, init_code_hash(init_code))
}

/// Converts an integer salt into its 32-byte big-endian form, i.e. `bytes32(uint256(value))`.
pub fn salt_from_u64(value: u64) -> B256 {
    B256::from(U256::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex};

    // Vectors from EIP-1014.
    #[test]
    fn test_eip1014_example_0() {
        let addr = predict_address(Address::ZERO, B256::ZERO, &hex!("00"));
        assert_eq!(addr, address!("4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38"));
    }

    #[test]
    fn test_eip1014_example_1() {
        let addr = predict_address(
            address!("deadbeef00000000000000000000000000000000"),
            B256::ZERO,
            &hex!("00"),
        );
        assert_eq!(addr, address!("B928f69Bb1D91Cd65274e3c79d8986362984fDA3"));
    }

    #[test]
    fn test_eip1014_example_2() {
        let addr = predict_address(
            address!("deadbeef00000000000000000000000000000000"),
            b256!("000000000000000000000000feed000000000000000000000000000000000000"),
            &hex!("00"),
        );
        assert_eq!(addr, address!("D04116cDd17beBE565EB2422F2497E06cC1C9833"));
    }

    #[test]
    fn test_eip1014_example_3() {
        let addr = predict_address(Address::ZERO, B256::ZERO, &hex!("deadbeef"));
        assert_eq!(addr, address!("70f2b2914A2a4b783FaEFb75f459A580616Fcb5e"));
    }

    #[test]
    fn test_eip1014_example_4() {
        let addr = predict_address(
            address!("00000000000000000000000000000000deadbeef"),
            b256!("00000000000000000000000000000000000000000000000000000000cafebabe"),
            &hex!("deadbeef"),
        );
        assert_eq!(addr, address!("60f3f640a8508fC6a86d45DF051962668E1e8AC7"));
    }

    #[test]
    fn test_eip1014_empty_init_code() {
        let addr = predict_address(Address::ZERO, B256::ZERO, &[]);
        assert_eq!(addr, address!("E33C0C7F7df4809055C3ebA6c09CFe4BaF1BD9e0"));
    }

    #[test]
    fn test_agrees_with_alloy_create2() {
        let deployer = address!("4e59b44847b379578588920ca78fbf26c0b4956c");
        let salt = salt_from_u64(12345);
        let init_code = hex!("6080604052348015600f57600080fd5b50");
        assert_eq!(
            predict_address(deployer, salt, &init_code),
            deployer.create2_from_code(salt, init_code)
        );
    }

    #[test]
    fn test_derive_checks_deployer_width() {
        let salt = [0u8; SALT_LEN];
        let hash = [0u8; INIT_CODE_HASH_LEN];

        for len in [19, 21] {
            let deployer = vec![0u8; len];
            assert_eq!(
                derive(&deployer, &salt, &hash),
                Err(DeriveError::InvalidInputLength {
                    field: InputField::Deployer,
                    expected: DEPLOYER_LEN,
                    actual: len,
                })
            );
        }
    }

    #[test]
    fn test_derive_checks_salt_and_hash_width() {
        let deployer = [0u8; DEPLOYER_LEN];
        assert!(matches!(
            derive(&deployer, &[0u8; 31], &[0u8; 32]),
            Err(DeriveError::InvalidInputLength { field: InputField::Salt, actual: 31, .. })
        ));
        assert!(matches!(
            derive(&deployer, &[0u8; 32], &[0u8; 33]),
            Err(DeriveError::InvalidInputLength { field: InputField::InitCodeHash, actual: 33, .. })
        ));
    }

    #[test]
    fn test_derive_matches_typed_variant() {
        let deployer = address!("00000000000000000000000000000000deadbeef");
        let salt = salt_from_u64(7);
        let hash = init_code_hash(&hex!("deadbeef"));
        assert_eq!(
            derive(deployer.as_slice(), salt.as_slice(), hash.as_slice()).unwrap(),
            derive_address(deployer, salt, hash)
        );
    }

    #[test]
    fn test_salt_from_u64_is_big_endian() {
        assert_eq!(
            salt_from_u64(12345),
            b256!("0000000000000000000000000000000000000000000000000000000000003039")
        );
    }
}
