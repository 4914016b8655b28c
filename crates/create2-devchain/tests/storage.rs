//! The single-slot storage contract on the development chain.

use alloy_primitives::U256;
use create2_devchain::{DevChain, SimpleStorage, SIMPLE_STORAGE_SLOT};
use create2_verify::{ChainBackend, ChainError};
use rstest::rstest;

#[test]
fn test_set_then_get() {
    let chain = DevChain::new().unwrap();
    let storage = SimpleStorage::deploy(&chain).unwrap();

    storage.set(U256::from(89)).unwrap();

    assert_eq!(storage.get().unwrap(), U256::from(89));
    assert_eq!(storage.stored_value().unwrap(), U256::from(89));
}

#[test]
fn test_fresh_instance_reads_zero() {
    let chain = DevChain::new().unwrap();
    let storage = SimpleStorage::deploy(&chain).unwrap();

    assert_eq!(storage.get().unwrap(), U256::ZERO);
}

#[test]
fn test_second_instance_is_independent() {
    let chain = DevChain::new().unwrap();
    let first = SimpleStorage::deploy(&chain).unwrap();
    first.set(U256::from(89)).unwrap();

    let second = SimpleStorage::deploy(&chain).unwrap();
    second.set(U256::from(1)).unwrap();

    assert_ne!(first.address(), second.address());
    assert_eq!(first.get().unwrap(), U256::from(89));
    assert_eq!(second.get().unwrap(), U256::from(1));
}

#[rstest]
#[case::one(U256::from(1))]
#[case::max(U256::MAX)]
#[case::overwrite_with_zero(U256::ZERO)]
fn test_overwrite(#[case] value: U256) {
    let chain = DevChain::new().unwrap();
    let storage = SimpleStorage::deploy(&chain).unwrap();
    storage.set(U256::from(89)).unwrap();

    storage.set(value).unwrap();

    assert_eq!(storage.get().unwrap(), value);
}

#[tokio::test]
async fn test_read_storage_through_backend() {
    let chain = DevChain::new().unwrap();
    let storage = SimpleStorage::deploy(&chain).unwrap();
    storage.set(U256::from(89)).unwrap();

    let value = chain.read_storage(storage.address(), SIMPLE_STORAGE_SLOT).await.unwrap();

    assert_eq!(value, U256::from(89));
}

#[test]
fn test_get_on_empty_account_is_malformed() {
    let chain = DevChain::new().unwrap();
    let nothing = SimpleStorage::at(&chain, alloy_primitives::Address::repeat_byte(0x11));

    // A call to a code-less account succeeds with no output.
    assert!(matches!(nothing.get(), Err(ChainError::MalformedOutput(output)) if output.is_empty()));
}
