//! Raw storage slot inspection for the storage layout demo.
//!
//! Solidity places array data at `keccak256(baseSlot)` and mapping entries
//! at `keccak256(key ++ baseSlot)`; the helpers here compute those keys so
//! the demo can read dynamic storage regions by hand. No generic slot
//! discovery is attempted.

use std::sync::Arc;

use ethers::{
    abi::Address,
    providers::Middleware,
    types::{H256, U256},
    utils::keccak256,
};

use crate::{errors::ScriptError, types::StorageSlotReading};

/// Convert a 256-bit slot number to its 32-byte big-endian storage key
fn u256_to_key(value: U256) -> H256 {
    let mut bytes = [0_u8; 32];
    value.to_big_endian(&mut bytes);
    H256::from(bytes)
}

/// Convert a small integer slot index to its 32-byte storage key
pub fn slot_index(index: u64) -> H256 {
    u256_to_key(U256::from(index))
}

/// The storage key at which a dynamic array's data begins,
/// given the array's base slot
pub fn array_data_slot(base_slot: u64) -> H256 {
    H256::from(keccak256(slot_index(base_slot).as_bytes()))
}

/// The storage key of a dynamic array element, given the array's base slot
pub fn array_element_slot(base_slot: u64, element_index: u64) -> H256 {
    let data_start = U256::from_big_endian(array_data_slot(base_slot).as_bytes());
    u256_to_key(data_start + U256::from(element_index))
}

/// The storage key of a mapping entry, given the mapping's base slot
/// and the 32-byte-padded entry key
pub fn mapping_entry_slot(key: H256, base_slot: u64) -> H256 {
    let mut preimage = [0_u8; 64];
    preimage[..32].copy_from_slice(key.as_bytes());
    preimage[32..].copy_from_slice(slot_index(base_slot).as_bytes());
    H256::from(keccak256(preimage))
}

/// Read the raw 32-byte value at the given storage key of a contract.
///
/// The reading is a snapshot of live chain state; no isolation is
/// provided across reads.
pub async fn read_slot_at(
    client: Arc<impl Middleware>,
    address: Address,
    key: H256,
) -> Result<StorageSlotReading, ScriptError> {
    let value = client
        .get_storage_at(address, key, None /* block */)
        .await
        .map_err(|e| ScriptError::StorageRead(e.to_string()))?;

    Ok(StorageSlotReading { slot: key, value })
}

/// Read the first `count` storage slots of a contract, in slot order
pub async fn read_slots(
    client: Arc<impl Middleware>,
    address: Address,
    count: u64,
) -> Result<Vec<StorageSlotReading>, ScriptError> {
    let mut readings = Vec::with_capacity(count as usize);
    for index in 0..count {
        readings.push(read_slot_at(client.clone(), address, slot_index(index)).await?);
    }

    Ok(readings)
}
