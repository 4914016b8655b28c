use core::convert::Infallible;

use alloy_primitives::{Address, B256, U256};
use delegate::delegate;
use revm::{
    database::{AccountState, CacheDB, EmptyDB},
    primitives::{StorageKey, StorageValue},
    state::{AccountInfo, Bytecode},
};

/// The in-memory world state of a development chain.
#[derive(Debug, Default, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct MemoryDatabase {
    #[deref]
    #[deref_mut]
    db: CacheDB<EmptyDB>,
}

impl MemoryDatabase {
    /// Sets the balance for an account in the database.
    pub fn set_account_balance(&mut self, address: Address, balance: U256) {
        let Ok(account) = self.db.load_account(address);
        account.info.balance = balance;
        account.account_state = AccountState::None;
    }

    /// Sets the balance for an account in the database.
    pub fn account_balance(mut self, address: Address, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Returns the nonce of an account, zero if it does not exist.
    pub fn account_nonce(&mut self, address: Address) -> u64 {
        let Ok(info) = revm::Database::basic(self, address);
        info.map(|info| info.nonce).unwrap_or_default()
    }

    /// Returns the runtime code of an account, `None` if it has none.
    pub fn account_code(&mut self, address: Address) -> Option<Bytecode> {
        let Ok(info) = revm::Database::basic(self, address);
        let info = info.filter(|info| !info.is_empty_code_hash())?;
        match info.code {
            Some(code) => Some(code),
            None => {
                let Ok(code) = revm::Database::code_by_hash(self, info.code_hash);
                Some(code)
            }
        }
    }
}

impl revm::Database for MemoryDatabase {
    type Error = Infallible;

    delegate! {
        to self.db {
            fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error>;
            fn code_by_hash(&mut self, code_hash: B256) -> Result<Bytecode, Self::Error>;
            fn storage(&mut self, address: Address, index: StorageKey) -> Result<StorageValue, Self::Error>;
            fn block_hash(&mut self, number: u64) -> Result<B256, Self::Error>;
        }
    }
}

impl revm::DatabaseCommit for MemoryDatabase {
    delegate! {
        to self.db {
            fn commit(&mut self, changes: revm::primitives::HashMap<Address, revm::state::Account>);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};

    #[test]
    fn test_missing_account_defaults() {
        let mut db = MemoryDatabase::default();
        let addr = address!("1111111111111111111111111111111111111111");
        assert_eq!(db.account_nonce(addr), 0);
        assert!(db.account_code(addr).is_none());
    }

    #[test]
    fn test_balance_is_visible() {
        let addr = address!("1111111111111111111111111111111111111111");
        let mut db = MemoryDatabase::default().account_balance(addr, U256::from(7));
        let Ok(info) = revm::Database::basic(&mut db, addr);
        assert_eq!(info.unwrap().balance, U256::from(7));
    }

    #[test]
    fn test_inserted_code_is_returned() {
        let addr = address!("1111111111111111111111111111111111111111");
        let mut db = MemoryDatabase::default();
        let code = Bytecode::new_raw(bytes!("6000"));
        db.insert_account_info(
            addr,
            AccountInfo { code_hash: code.hash_slow(), code: Some(code), ..Default::default() },
        );
        assert_eq!(db.account_code(addr).unwrap().original_bytes(), bytes!("6000"));
    }
}
