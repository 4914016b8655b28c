//! The in-process development chain.

use std::sync::{Mutex, MutexGuard};

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use create2_verify::{ChainBackend, ChainError, DEPLOYER_LEN};
use revm::{
    context::{
        result::{ExecutionResult, Output},
        TxEnv,
    },
    Context, ExecuteCommitEvm, MainBuilder, MainContext,
};
use tracing::{debug, trace};

use crate::{
    constants::{
        CREATE2_FACTORY_ADDRESS, CREATE2_FACTORY_DEPLOYER, CREATE2_FACTORY_INIT_CODE, DEV_ACCOUNT,
        DEV_ACCOUNT_BALANCE, DEV_TX_GAS_LIMIT,
    },
    MemoryDatabase,
};

/// A single-node EVM chain held in memory.
///
/// Every transaction executes and commits immediately, so a deployment is final as soon as
/// the call returns. Transactions are serialized behind a mutex; that order is the chain's
/// total order.
///
/// The [`ChainBackend`] futures run to completion on their first poll and never yield, so a
/// verifier deadline cannot interrupt a deployment on this chain.
#[derive(Debug)]
pub struct DevChain {
    db: Mutex<MemoryDatabase>,
}

impl DevChain {
    /// Creates a chain with a funded [`DEV_ACCOUNT`] and the `CREATE2` factory installed.
    pub fn new() -> Result<Self, ChainError> {
        let db = MemoryDatabase::default().account_balance(DEV_ACCOUNT, DEV_ACCOUNT_BALANCE);
        let chain = Self { db: Mutex::new(db) };
        chain.install_factory()?;
        Ok(chain)
    }

    /// The funded account transactions are sent from.
    pub const fn dev_account(&self) -> Address {
        DEV_ACCOUNT
    }

    /// The address of the `CREATE2` factory.
    pub const fn factory(&self) -> Address {
        CREATE2_FACTORY_ADDRESS
    }

    /// Deploys `init_code` with a plain `CREATE` from the development account.
    pub fn create(&self, init_code: Bytes) -> Result<Address, ChainError> {
        let mut db = self.lock()?;
        let address = Self::transact_create(&mut db, DEV_ACCOUNT, init_code)?;
        debug!(target: "create2::devchain", %address, "Contract created");
        Ok(address)
    }

    /// Deploys `init_code` under `salt` through the `CREATE2` factory.
    pub fn create2(&self, salt: B256, init_code: Bytes) -> Result<Address, ChainError> {
        let mut calldata = Vec::with_capacity(32 + init_code.len());
        calldata.extend_from_slice(salt.as_slice());
        calldata.extend_from_slice(&init_code);

        let output = self.call(CREATE2_FACTORY_ADDRESS, calldata.into())?;
        if output.len() != DEPLOYER_LEN {
            return Err(ChainError::MalformedOutput(output));
        }
        let address = Address::from_slice(&output);
        debug!(target: "create2::devchain", %salt, %address, "Contract created through factory");
        Ok(address)
    }

    /// Sends a call from the development account and returns its output.
    pub fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let mut db = self.lock()?;
        match Self::transact(&mut db, DEV_ACCOUNT, TxKind::Call(to), data)? {
            ExecutionResult::Success { output, .. } => Ok(output.into_data()),
            ExecutionResult::Revert { output, .. } => Err(ChainError::Reverted { output }),
            ExecutionResult::Halt { reason, .. } => {
                Err(ChainError::Halted { reason: format!("{reason:?}") })
            }
        }
    }

    /// Sets the balance of `address`, creating the account if needed.
    pub fn fund(&self, address: Address, balance: U256) -> Result<(), ChainError> {
        self.lock()?.set_account_balance(address, balance);
        Ok(())
    }

    /// Returns the balance of `address`.
    pub fn balance(&self, address: Address) -> Result<U256, ChainError> {
        let mut db = self.lock()?;
        let Ok(info) = revm::Database::basic(&mut *db, address);
        Ok(info.map(|info| info.balance).unwrap_or_default())
    }

    /// Returns the runtime code at `address`, empty if there is none.
    pub fn code(&self, address: Address) -> Result<Bytes, ChainError> {
        Ok(self.lock()?.account_code(address).map(|code| code.original_bytes()).unwrap_or_default())
    }

    /// Reads a storage slot.
    pub fn storage(&self, address: Address, slot: U256) -> Result<U256, ChainError> {
        let mut db = self.lock()?;
        let Ok(value) = revm::Database::storage(&mut *db, address, slot);
        Ok(value)
    }

    /// Returns the nonce of `address`.
    pub fn nonce(&self, address: Address) -> Result<u64, ChainError> {
        Ok(self.lock()?.account_nonce(address))
    }

    /// Replays the keyless factory deployment: the factory signer's nonce-0 `CREATE` lands
    /// at the canonical factory address on every chain.
    fn install_factory(&self) -> Result<(), ChainError> {
        let mut db = self.lock()?;
        let address =
            Self::transact_create(&mut db, CREATE2_FACTORY_DEPLOYER, CREATE2_FACTORY_INIT_CODE)?;
        if address != CREATE2_FACTORY_ADDRESS {
            return Err(ChainError::State(format!(
                "CREATE2 factory deployed at {address}, expected {CREATE2_FACTORY_ADDRESS}"
            )));
        }
        debug!(target: "create2::devchain", %address, "CREATE2 factory installed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryDatabase>, ChainError> {
        self.db.lock().map_err(|_| ChainError::State("dev chain state poisoned".to_string()))
    }

    fn transact_create(
        db: &mut MemoryDatabase,
        caller: Address,
        init_code: Bytes,
    ) -> Result<Address, ChainError> {
        match Self::transact(db, caller, TxKind::Create, init_code)? {
            ExecutionResult::Success { output: Output::Create(_, Some(address)), .. } => Ok(address),
            ExecutionResult::Success { output, .. } => {
                Err(ChainError::MalformedOutput(output.into_data()))
            }
            ExecutionResult::Revert { output, .. } => Err(ChainError::Reverted { output }),
            ExecutionResult::Halt { reason, .. } => {
                Err(ChainError::Halted { reason: format!("{reason:?}") })
            }
        }
    }

    /// Executes and commits one transaction.
    fn transact(
        db: &mut MemoryDatabase,
        caller: Address,
        kind: TxKind,
        data: Bytes,
    ) -> Result<ExecutionResult, ChainError> {
        let nonce = db.account_nonce(caller);
        trace!(target: "create2::devchain", %caller, ?kind, nonce, data_len = data.len(), "Executing transaction");

        let tx = TxEnv {
            caller,
            kind,
            data,
            nonce,
            gas_limit: DEV_TX_GAS_LIMIT,
            ..Default::default()
        };
        let mut evm = Context::mainnet().with_db(db).build_mainnet();
        let result = evm.transact_commit(tx).map_err(|err| ChainError::Invalid(err.to_string()))?;

        trace!(target: "create2::devchain", gas_used = result.gas_used(), success = result.is_success(), "Transaction committed");
        Ok(result)
    }
}

impl ChainBackend for DevChain {
    fn deployer(&self) -> Address {
        self.factory()
    }

    async fn deploy(&self, salt: B256, init_code: Bytes) -> Result<Address, ChainError> {
        self.create2(salt, init_code)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ChainError> {
        self.code(address)
    }

    async fn nonce_at(&self, address: Address) -> Result<u64, ChainError> {
        self.nonce(address)
    }

    async fn read_storage(&self, address: Address, slot: U256) -> Result<U256, ChainError> {
        self.storage(address, slot)
    }
}
