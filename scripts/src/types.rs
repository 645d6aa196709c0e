//! Type definitions used throughout the scripts

use ethers::{
    abi::{Address, Token},
    types::H256,
};

/// The result of a single contract deployment.
///
/// Represents on-chain state and is never mutated after creation.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    /// The name of the deployed contract's artifact
    pub name: String,
    /// The address the contract was mined at
    pub address: Address,
    /// The constructor arguments the contract was deployed with
    pub constructor_args: Vec<Token>,
    /// The number of confirmations awaited before the deployment
    /// was considered final
    pub confirmations: usize,
}

/// The outcome of a block explorer verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// The verification request was accepted by the explorer
    Submitted,
    /// Verification was not attempted, or failed and was swallowed
    Skipped,
}

/// A snapshot of a single raw storage slot.
///
/// Re-reading the same slot later may return a different value if
/// intervening transactions mutated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSlotReading {
    /// The slot key, either a small integer index or a computed hash
    pub slot: H256,
    /// The raw 32-byte value held in the slot
    pub value: H256,
}
