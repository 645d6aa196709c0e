//! Constants used in the deploy scripts

/// The number of decimals the mock price feed reports
pub const MOCK_DECIMALS: u8 = 8;

/// The initial ETH/USD answer the mock price feed is seeded with,
/// scaled by [`MOCK_DECIMALS`] (i.e. $2000.00000000). Signed, matching
/// the aggregator's `int256` answer type.
pub const MOCK_INITIAL_ANSWER: i64 = 200_000_000_000;

/// The name of the FundMe compilation artifact
pub const FUND_ME_ARTIFACT: &str = "FundMe";

/// The name of the mock price feed compilation artifact
pub const MOCK_V3_AGGREGATOR_ARTIFACT: &str = "MockV3Aggregator";

/// The name of the storage demo compilation artifact
pub const FUN_WITH_STORAGE_ARTIFACT: &str = "FunWithStorage";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The FundMe contract key in the `deployments.json` file
pub const FUND_ME_CONTRACT_KEY: &str = "fund_me_contract";

/// The mock price feed contract key in the `deployments.json` file
pub const MOCK_V3_AGGREGATOR_CONTRACT_KEY: &str = "mock_v3_aggregator_contract";

/// The storage demo contract key in the `deployments.json` file
pub const FUN_WITH_STORAGE_CONTRACT_KEY: &str = "fun_with_storage_contract";

/// The extension of a compilation artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The number of storage slots the storage demo logs after deployment
pub const NUM_INSPECTED_SLOTS: u64 = 10;

/// The base slot of the storage demo's dynamic array
pub const ARRAY_BASE_SLOT: u64 = 2;

/// The number of confirmations to await when no network-specific
/// count is configured
pub const DEFAULT_CONFIRMATIONS: usize = 1;
