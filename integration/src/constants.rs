//! Constants used in the integration tests

/// The default hostport that the local devnet node runs on
pub(crate) const DEFAULT_DEVNET_HOSTPORT: &str = "http://localhost:8545";

/// The first private key that Hardhat and Anvil devnets are seeded with
pub(crate) const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The amount of ETH each funder sends to the FundMe contract, in wei (1 ETH)
pub(crate) const SEND_VALUE: u128 = 1_000_000_000_000_000_000;

/// The amount of ETH seeded to each extra funder account, in wei (2 ETH,
/// covering the funded value plus gas)
pub(crate) const FUNDER_SEED_VALUE: u128 = 2_000_000_000_000_000_000;

/// The number of extra funder accounts used in the multi-funder tests
pub(crate) const NUM_EXTRA_FUNDERS: usize = 5;
