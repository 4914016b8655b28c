//! Contracts hosted on the development chain.

use alloy_primitives::{Address, Bytes, U256};
use create2_verify::ChainError;
use revm::bytecode::opcode::{
    CALLDATALOAD, CALLDATASIZE, ISZERO, JUMPDEST, JUMPI, MSTORE, RETURN, SLOAD, SSTORE, STOP,
};

use crate::{creation_code, BytecodeBuilder, DevChain};

/// The storage slot holding the stored value.
pub const SIMPLE_STORAGE_SLOT: U256 = U256::ZERO;

/// Offset of the read branch in the runtime code.
const READ_BRANCH: u8 = 0x0c;

/// Runtime code of the single-slot storage contract.
///
/// A call with a 32-byte word stores it in slot 0; a call without data returns slot 0.
pub fn simple_storage_runtime() -> Bytes {
    BytecodeBuilder::default()
        .append_many([CALLDATASIZE, ISZERO])
        .push_u8(READ_BRANCH)
        .append(JUMPI)
        // write: sstore(0, calldataload(0))
        .push_u8(0)
        .append(CALLDATALOAD)
        .push_u8(0)
        .append(SSTORE)
        .append(STOP)
        // read: mstore(0, sload(0)); return(0, 32)
        .append(JUMPDEST)
        .push_u8(0)
        .append(SLOAD)
        .push_u8(0)
        .append(MSTORE)
        .push_u8(32)
        .push_u8(0)
        .append(RETURN)
        .build()
}

/// Init code of the single-slot storage contract.
pub fn simple_storage_init_code() -> Bytes {
    creation_code(&simple_storage_runtime())
}

/// A deployed single-slot storage contract.
#[derive(Debug, Clone, Copy)]
pub struct SimpleStorage<'a> {
    chain: &'a DevChain,
    address: Address,
}

impl<'a> SimpleStorage<'a> {
    /// Deploys a fresh instance from the development account.
    pub fn deploy(chain: &'a DevChain) -> Result<Self, ChainError> {
        let address = chain.create(simple_storage_init_code())?;
        Ok(Self { chain, address })
    }

    /// Attaches to an instance deployed elsewhere, e.g. through the `CREATE2` factory.
    pub const fn at(chain: &'a DevChain, address: Address) -> Self {
        Self { chain, address }
    }

    /// The instance's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Stores `value`.
    pub fn set(&self, value: U256) -> Result<(), ChainError> {
        self.chain.call(self.address, Bytes::from(value.to_be_bytes::<32>()))?;
        Ok(())
    }

    /// Reads the stored value through the contract.
    pub fn get(&self) -> Result<U256, ChainError> {
        let output = self.chain.call(self.address, Bytes::new())?;
        if output.len() != 32 {
            return Err(ChainError::MalformedOutput(output));
        }
        Ok(U256::from_be_slice(&output))
    }

    /// Reads the stored value directly from chain state.
    pub fn stored_value(&self) -> Result<U256, ChainError> {
        self.chain.storage(self.address, SIMPLE_STORAGE_SLOT)
    }
}
