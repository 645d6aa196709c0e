//! Integration tests for the FundMe contracts

use std::sync::Arc;

use ethers::{
    abi::Address,
    providers::Middleware,
    types::{H256, U256},
};
use eyre::{eyre, Result};
use fundme_scripts::{
    constants::{ARRAY_BASE_SLOT, MOCK_DECIMALS},
    storage::{array_data_slot, read_slot_at, slot_index},
};

use crate::{
    abis::FundMeContract,
    constants::{NUM_EXTRA_FUNDERS, SEND_VALUE},
    utils::{gas_cost, TestContext},
};

/// Fund the contract at the given address with [`SEND_VALUE`], signing
/// with the given client
async fn fund_as(client: Arc<impl Middleware + 'static>, address: Address) -> Result<()> {
    let fund_me = FundMeContract::new(address, client);
    fund_me
        .fund()
        .value(SEND_VALUE)
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("no receipt for fund transaction"))?;

    Ok(())
}

/// The constructor wires the price feed address into the contract
pub(crate) async fn test_constructor(ctx: &TestContext<impl Middleware + 'static>) -> Result<()> {
    let fund_me = ctx.fund_me()?;

    let price_feed = fund_me.get_price_feed().call().await?;
    assert_eq!(
        price_feed,
        ctx.mock_address()?,
        "constructor did not set the aggregator address",
    );

    let decimals = ctx.mock_aggregator()?.decimals().call().await?;
    assert_eq!(
        decimals, MOCK_DECIMALS,
        "mock aggregator was not provisioned with the expected precision",
    );

    Ok(())
}

/// Funding updates the per-funder accounting and the funders array
pub(crate) async fn test_fund(ctx: &TestContext<impl Middleware + 'static>) -> Result<()> {
    let fund_me = ctx.fund_me()?;
    let deployer = ctx.deployer_address()?;

    let starting_amount = fund_me
        .get_address_to_amount_funded(deployer)
        .call()
        .await?;

    fund_as(ctx.client.clone(), fund_me.address()).await?;

    let ending_amount = fund_me
        .get_address_to_amount_funded(deployer)
        .call()
        .await?;
    assert_eq!(
        ending_amount - starting_amount,
        U256::from(SEND_VALUE),
        "amount funded was not recorded",
    );

    let funder = fund_me.get_funder(U256::zero()).call().await?;
    assert_ne!(funder, Address::zero(), "funder was not added to the array");

    Ok(())
}

/// Funding below the USD minimum reverts
pub(crate) async fn test_fund_below_minimum(
    ctx: &TestContext<impl Middleware + 'static>,
) -> Result<()> {
    let fund_me = ctx.fund_me()?;

    let call = fund_me.fund().value(1_u64);
    let res = call.send().await;
    assert!(res.is_err(), "funding below the minimum did not revert");

    Ok(())
}

/// The owner withdraws a single funder's balance; the contract is drained
/// and the deployer recoups everything minus gas
pub(crate) async fn test_withdraw(ctx: &TestContext<impl Middleware + 'static>) -> Result<()> {
    let fund_me = ctx.fund_me()?;
    fund_as(ctx.client.clone(), fund_me.address()).await?;

    let deployer = ctx.deployer_address()?;
    let starting_contract_balance = ctx.balance_of(fund_me.address()).await?;
    let starting_deployer_balance = ctx.balance_of(deployer).await?;

    let receipt = fund_me
        .withdraw()
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("no receipt for withdraw transaction"))?;

    let ending_contract_balance = ctx.balance_of(fund_me.address()).await?;
    let ending_deployer_balance = ctx.balance_of(deployer).await?;

    assert_eq!(
        ending_contract_balance,
        U256::zero(),
        "withdraw left a balance in the contract",
    );
    assert_eq!(
        starting_contract_balance + starting_deployer_balance,
        ending_deployer_balance + gas_cost(&receipt),
        "deployer did not receive the withdrawn balance",
    );

    Ok(())
}

/// The owner withdraws with multiple funders; every funder's accounting
/// is reset and the funders array is emptied
pub(crate) async fn test_withdraw_multiple_funders(
    ctx: &TestContext<impl Middleware + 'static>,
) -> Result<()> {
    let fund_me = ctx.fund_me()?;
    fund_as(ctx.client.clone(), fund_me.address()).await?;

    let mut funders = Vec::with_capacity(NUM_EXTRA_FUNDERS);
    for _ in 0..NUM_EXTRA_FUNDERS {
        let funder = ctx.create_funder().await?;
        let funder_address = funder
            .default_sender()
            .ok_or_else(|| eyre!("funder client does not have a sender attached"))?;

        fund_as(funder, fund_me.address()).await?;
        funders.push(funder_address);
    }

    fund_me
        .withdraw()
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("no receipt for withdraw transaction"))?;

    assert_eq!(
        ctx.balance_of(fund_me.address()).await?,
        U256::zero(),
        "withdraw left a balance in the contract",
    );

    // The funders array is reset
    let res = fund_me.get_funder(U256::zero()).call().await;
    assert!(res.is_err(), "funders array was not reset");

    // And so is each funder's accounting
    for funder in funders {
        let amount = fund_me.get_address_to_amount_funded(funder).call().await?;
        assert_eq!(amount, U256::zero(), "funder accounting was not reset");
    }

    Ok(())
}

/// The gas-optimized withdrawal behaves like the standard one
pub(crate) async fn test_cheaper_withdraw(
    ctx: &TestContext<impl Middleware + 'static>,
) -> Result<()> {
    let fund_me = ctx.fund_me()?;
    fund_as(ctx.client.clone(), fund_me.address()).await?;

    let deployer = ctx.deployer_address()?;
    let starting_contract_balance = ctx.balance_of(fund_me.address()).await?;
    let starting_deployer_balance = ctx.balance_of(deployer).await?;

    let receipt = fund_me
        .cheaper_withdraw()
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("no receipt for cheaperWithdraw transaction"))?;

    let ending_contract_balance = ctx.balance_of(fund_me.address()).await?;
    let ending_deployer_balance = ctx.balance_of(deployer).await?;

    assert_eq!(
        ending_contract_balance,
        U256::zero(),
        "cheaperWithdraw left a balance in the contract",
    );
    assert_eq!(
        starting_contract_balance + starting_deployer_balance,
        ending_deployer_balance + gas_cost(&receipt),
        "deployer did not receive the withdrawn balance",
    );

    Ok(())
}

/// Only the owner may withdraw
pub(crate) async fn test_only_owner_withdraw(
    ctx: &TestContext<impl Middleware + 'static>,
) -> Result<()> {
    let fund_me = ctx.fund_me()?;
    fund_as(ctx.client.clone(), fund_me.address()).await?;

    let attacker = ctx.create_funder().await?;
    let fund_me_as_attacker = FundMeContract::new(fund_me.address(), attacker);

    let call = fund_me_as_attacker.withdraw();
    let res = call.send().await;
    assert!(res.is_err(), "non-owner was able to withdraw");

    Ok(())
}

/// The storage demo's slots follow the Solidity layout rules: the array
/// length lives at its base slot, the data at the hash of the base slot.
/// The two readings are independent and legitimately differ.
pub(crate) async fn test_storage_layout(
    ctx: &TestContext<impl Middleware + 'static>,
) -> Result<()> {
    let address = ctx.fun_with_storage_address()?;

    let length_reading =
        read_slot_at(ctx.client.clone(), address, slot_index(ARRAY_BASE_SLOT)).await?;
    let length = U256::from_big_endian(length_reading.value.as_bytes());
    assert!(
        length >= U256::one(),
        "array length slot should hold at least one element",
    );

    let element_reading =
        read_slot_at(ctx.client.clone(), address, array_data_slot(ARRAY_BASE_SLOT)).await?;
    assert_ne!(
        element_reading.value,
        H256::zero(),
        "first array element slot should be populated",
    );

    Ok(())
}
