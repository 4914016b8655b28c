//! Well-known addresses and code of the development chain.

use alloy_primitives::{address, bytes, uint, Address, Bytes, U256};

/// The canonical deterministic deployment proxy.
///
/// Calldata is `salt ‖ init_code`; the proxy runs `CREATE2` with them and returns the
/// 20-byte created address, reverting if creation fails.
/// Source: <https://github.com/Arachnid/deterministic-deployment-proxy>
pub const CREATE2_FACTORY_ADDRESS: Address = address!("4e59b44847b379578588920ca78fbf26c0b4956c");

/// The keyless signer that deploys the proxy with its nonce-0 `CREATE`.
pub const CREATE2_FACTORY_DEPLOYER: Address =
    address!("3fab184622dc19b6109349b94811493bf2a45362");

/// Init code of the deterministic deployment proxy.
pub const CREATE2_FACTORY_INIT_CODE: Bytes = bytes!("604580600e600039806000f350fe7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe03601600081602082378035828234f58015156039578182fd5b8082525050506014600cf3");

/// The funded account transactions are sent from.
pub const DEV_ACCOUNT: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// Initial balance of [`DEV_ACCOUNT`] (10,000 ether).
pub const DEV_ACCOUNT_BALANCE: U256 = uint!(10_000_000_000_000_000_000_000_U256);

/// Gas limit of every development transaction. Stays below the EIP-7825 transaction cap.
pub const DEV_TX_GAS_LIMIT: u64 = 10_000_000;
