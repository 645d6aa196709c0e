//! Solidity ABI definitions for the contracts used in integration tests

use ethers::prelude::abigen;

abigen!(
    FundMeContract,
    r#"[
        function fund() external payable
        function withdraw() external
        function cheaperWithdraw() external
        function getOwner() external view returns (address)
        function getPriceFeed() external view returns (address)
        function getFunder(uint256 index) external view returns (address)
        function getAddressToAmountFunded(address funder) external view returns (uint256)
        function MINIMUM_USD() external view returns (uint256)
    ]"#
);

abigen!(
    MockV3AggregatorContract,
    r#"[
        function decimals() external view returns (uint8)
        function latestRoundData() external view returns (uint80, int256, uint256, uint256, uint80)
        function updateAnswer(int256 answer) external
    ]"#
);
