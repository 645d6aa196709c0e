//! Definition of the CLI arguments for integration tests

use clap::{Parser, ValueEnum};

use crate::constants::{DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY};

/// CLI tool for running integration tests against a running devnet node.
///
/// Assumes that the contracts invoked in the tests have already been
/// deployed to the devnet by the deploy scripts.
#[derive(Parser)]
pub(crate) struct Cli {
    /// Test to run
    #[arg(short, long)]
    pub(crate) test: Tests,

    /// Name of the network the contracts were deployed to
    #[arg(short, long, default_value = "localhost")]
    pub(crate) network: String,

    /// Path to file containing contract deployment info
    #[arg(short, long, default_value = "deployments.json")]
    pub(crate) deployments_file: String,

    /// Devnet private key, defaults to the first Hardhat/Anvil dev key
    #[arg(short, long, default_value = DEFAULT_DEVNET_PKEY)]
    pub(crate) priv_key: String,

    /// Devnet RPC URL
    #[arg(short, long, default_value = DEFAULT_DEVNET_HOSTPORT)]
    pub(crate) rpc_url: String,
}

#[derive(ValueEnum, Clone, Copy)]
pub(crate) enum Tests {
    /// The FundMe constructor wires in the mock aggregator address
    Constructor,
    /// Funding updates the per-funder accounting
    Fund,
    /// Funding below the USD minimum reverts
    FundBelowMinimum,
    /// The owner can withdraw a single funder's balance
    Withdraw,
    /// The owner can withdraw with multiple funders, resetting them
    WithdrawMultipleFunders,
    /// The gas-optimized withdrawal drains the contract the same way
    CheaperWithdraw,
    /// Non-owners cannot withdraw
    OnlyOwnerWithdraw,
    /// The storage demo's slots follow the Solidity layout rules
    StorageLayout,
}
