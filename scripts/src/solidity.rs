//! Definitions of Solidity functions called after deployment

use ethers::contract::abigen;

abigen!(
    FundMeContract,
    r#"[
        function fund() external payable
        function withdraw() external
        function getPriceFeed() external view returns (address)
    ]"#
);
