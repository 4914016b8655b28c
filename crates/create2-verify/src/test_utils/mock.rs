use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::{ChainBackend, ChainError};

/// How a [`MockBackend`] answers deployment requests.
#[derive(Debug, Clone, Default)]
pub enum MockDeploy {
    /// Behave like a chain: create at the `CREATE2` address, revert if it is occupied.
    ///
    /// The init code itself is installed as runtime code, so empty init code models a
    /// constructor that installs none.
    #[default]
    Create2,
    /// Always report the given address.
    Fixed(Address),
    /// Occupy the `CREATE2` address as a concurrent deployment would, then revert.
    RaceLost,
    /// Fail with the given error.
    Fail(ChainError),
    /// Never resolve.
    Hang,
}

/// An in-memory [`ChainBackend`] with scripted deployment behavior.
///
/// Addresses are computed with alloy's `create2_from_code`, independently of this crate's
/// derivation engine.
#[derive(Debug)]
pub struct MockBackend {
    deployer: Address,
    deploy: MockDeploy,
    code: Mutex<HashMap<Address, Bytes>>,
    nonces: Mutex<HashMap<Address, u64>>,
    storage: Mutex<HashMap<(Address, U256), U256>>,
    deploy_calls: AtomicUsize,
    code_queries: AtomicUsize,
    code_query_failure: Option<(usize, ChainError)>,
}

impl MockBackend {
    /// Creates a backend whose deployer contract lives at `deployer`.
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            deploy: MockDeploy::default(),
            code: Mutex::default(),
            nonces: Mutex::default(),
            storage: Mutex::default(),
            deploy_calls: AtomicUsize::new(0),
            code_queries: AtomicUsize::new(0),
            code_query_failure: None,
        }
    }

    /// Sets how deployment requests are answered.
    pub fn with_deploy(mut self, deploy: MockDeploy) -> Self {
        self.deploy = deploy;
        self
    }

    /// Answers every code query after the first `succeeding` ones with `error`.
    pub fn with_code_query_failure(mut self, succeeding: usize, error: ChainError) -> Self {
        self.code_query_failure = Some((succeeding, error));
        self
    }

    /// Installs placeholder code at `address`.
    pub fn occupy(&self, address: Address) {
        self.install(address, Bytes::from_static(&[0x00]));
    }

    /// Sets the nonce of `address`.
    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.nonces.lock().unwrap().insert(address, nonce);
    }

    /// Sets a storage slot.
    pub fn set_storage(&self, address: Address, slot: U256, value: U256) {
        self.storage.lock().unwrap().insert((address, slot), value);
    }

    /// Number of deployment requests received so far.
    pub fn deploy_calls(&self) -> usize {
        self.deploy_calls.load(Ordering::SeqCst)
    }

    /// Creates the account at `address` the way a chain does: code installed, nonce 1.
    fn install(&self, address: Address, code: Bytes) {
        self.code.lock().unwrap().insert(address, code);
        self.nonces.lock().unwrap().entry(address).or_insert(1);
    }

    fn is_occupied(&self, address: Address) -> bool {
        self.code.lock().unwrap().get(&address).is_some_and(|code| !code.is_empty())
            || self.nonces.lock().unwrap().get(&address).is_some_and(|nonce| *nonce != 0)
    }
}

impl ChainBackend for MockBackend {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(&self, salt: B256, init_code: Bytes) -> Result<Address, ChainError> {
        self.deploy_calls.fetch_add(1, Ordering::SeqCst);
        let target = self.deployer.create2_from_code(salt, &init_code);
        match &self.deploy {
            MockDeploy::Create2 => {
                if self.is_occupied(target) {
                    return Err(ChainError::Reverted { output: Bytes::new() });
                }
                self.install(target, init_code);
                Ok(target)
            }
            MockDeploy::Fixed(address) => {
                self.install(*address, init_code);
                Ok(*address)
            }
            MockDeploy::RaceLost => {
                self.install(target, init_code);
                Err(ChainError::Reverted { output: Bytes::new() })
            }
            MockDeploy::Fail(err) => Err(err.clone()),
            MockDeploy::Hang => std::future::pending().await,
        }
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ChainError> {
        let query = self.code_queries.fetch_add(1, Ordering::SeqCst);
        if let Some((succeeding, error)) = &self.code_query_failure {
            if query >= *succeeding {
                return Err(error.clone());
            }
        }
        Ok(self.code.lock().unwrap().get(&address).cloned().unwrap_or_default())
    }

    async fn nonce_at(&self, address: Address) -> Result<u64, ChainError> {
        Ok(self.nonces.lock().unwrap().get(&address).copied().unwrap_or_default())
    }

    async fn read_storage(&self, address: Address, slot: U256) -> Result<U256, ChainError> {
        Ok(self.storage.lock().unwrap().get(&(address, slot)).copied().unwrap_or_default())
    }
}
