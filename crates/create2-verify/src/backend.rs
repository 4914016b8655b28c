//! The chain collaborator consumed by the verifier.

use std::{future::Future, sync::Arc};

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::ChainError;

/// A chain that can perform salt-addressed deployments.
///
/// Implementations own the deployer contract. The verifier never asks a backend where a
/// deployment will land; it derives that independently and compares.
pub trait ChainBackend: Send + Sync {
    /// The identity that executes `CREATE2` on this chain, i.e. the deployer contract.
    fn deployer(&self) -> Address;

    /// Deploys `init_code` under `salt` and returns the address the chain created.
    ///
    /// Resolves once the deployment is final. There is no intrinsic timeout.
    fn deploy(
        &self,
        salt: B256,
        init_code: Bytes,
    ) -> impl Future<Output = Result<Address, ChainError>> + Send;

    /// Returns the runtime code installed at `address`, empty if there is none.
    fn code_at(&self, address: Address) -> impl Future<Output = Result<Bytes, ChainError>> + Send;

    /// Returns the nonce of the account at `address`, zero if there is no account.
    fn nonce_at(&self, address: Address) -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Reads storage slot `slot` of the account at `address`.
    fn read_storage(
        &self,
        address: Address,
        slot: U256,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send;
}

impl<T: ChainBackend> ChainBackend for &T {
    fn deployer(&self) -> Address {
        (**self).deployer()
    }

    fn deploy(
        &self,
        salt: B256,
        init_code: Bytes,
    ) -> impl Future<Output = Result<Address, ChainError>> + Send {
        (**self).deploy(salt, init_code)
    }

    fn code_at(&self, address: Address) -> impl Future<Output = Result<Bytes, ChainError>> + Send {
        (**self).code_at(address)
    }

    fn nonce_at(&self, address: Address) -> impl Future<Output = Result<u64, ChainError>> + Send {
        (**self).nonce_at(address)
    }

    fn read_storage(
        &self,
        address: Address,
        slot: U256,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send {
        (**self).read_storage(address, slot)
    }
}

impl<T: ChainBackend> ChainBackend for Arc<T> {
    fn deployer(&self) -> Address {
        (**self).deployer()
    }

    fn deploy(
        &self,
        salt: B256,
        init_code: Bytes,
    ) -> impl Future<Output = Result<Address, ChainError>> + Send {
        (**self).deploy(salt, init_code)
    }

    fn code_at(&self, address: Address) -> impl Future<Output = Result<Bytes, ChainError>> + Send {
        (**self).code_at(address)
    }

    fn nonce_at(&self, address: Address) -> impl Future<Output = Result<u64, ChainError>> + Send {
        (**self).nonce_at(address)
    }

    fn read_storage(
        &self,
        address: Address,
        slot: U256,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send {
        (**self).read_storage(address, slot)
    }
}
