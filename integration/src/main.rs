//! Integration tests for the FundMe contracts. These assume that a devnet is
//! already running locally and that the contracts have been deployed to it.

use clap::Parser;
use cli::{Cli, Tests};
use eyre::Result;
use fundme_scripts::utils::setup_client;
use tests::{
    test_cheaper_withdraw, test_constructor, test_fund, test_fund_below_minimum,
    test_only_owner_withdraw, test_storage_layout, test_withdraw, test_withdraw_multiple_funders,
};
use utils::TestContext;

mod abis;
mod cli;
mod constants;
mod tests;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        test,
        network,
        deployments_file,
        priv_key,
        rpc_url,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;
    let ctx = TestContext::new(client, &network, &deployments_file, &rpc_url);

    match test {
        Tests::Constructor => test_constructor(&ctx).await?,
        Tests::Fund => test_fund(&ctx).await?,
        Tests::FundBelowMinimum => test_fund_below_minimum(&ctx).await?,
        Tests::Withdraw => test_withdraw(&ctx).await?,
        Tests::WithdrawMultipleFunders => test_withdraw_multiple_funders(&ctx).await?,
        Tests::CheaperWithdraw => test_cheaper_withdraw(&ctx).await?,
        Tests::OnlyOwnerWithdraw => test_only_owner_withdraw(&ctx).await?,
        Tests::StorageLayout => test_storage_layout(&ctx).await?,
    }

    println!("test passed");

    Ok(())
}
