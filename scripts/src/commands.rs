//! Implementations of the various deploy scripts

use std::sync::Arc;

use ethers::{
    abi::{Address, Token},
    providers::Middleware,
    types::{I256, U256},
};
use tracing::info;

use crate::{
    chains::{network_profile, resolve_price_feed, NetworkKind, NetworkProfile},
    cli::{DeployArgs, Stage},
    constants::{
        ARRAY_BASE_SLOT, FUND_ME_ARTIFACT, FUND_ME_CONTRACT_KEY, FUN_WITH_STORAGE_ARTIFACT,
        FUN_WITH_STORAGE_CONTRACT_KEY, MOCK_DECIMALS, MOCK_INITIAL_ANSWER,
        MOCK_V3_AGGREGATOR_ARTIFACT, MOCK_V3_AGGREGATOR_CONTRACT_KEY, NUM_INSPECTED_SLOTS,
    },
    errors::ScriptError,
    solidity::FundMeContract,
    storage::{array_data_slot, read_slot_at, read_slots, slot_index},
    utils::{deploy_contract, load_artifact, read_deployed_address, write_deployed_address},
    verify::verify_contract,
};

/// Run the selected deployment stages in dependency order
pub(crate) async fn deploy(
    args: DeployArgs,
    client: Arc<impl Middleware>,
    network: &str,
    deployments_path: &str,
    artifacts_path: &str,
    etherscan_api_key: Option<&str>,
) -> Result<(), ScriptError> {
    let profile = network_profile(network);
    info!("deploying to network {}", profile.name);

    let mut mock_address = None;
    if args.stage_selected(Stage::Mocks) {
        mock_address = deploy_mocks(
            client.clone(),
            &profile,
            deployments_path,
            artifacts_path,
            args.redeploy,
        )
        .await?;
    }

    if args.stage_selected(Stage::FundMe) {
        deploy_fund_me(
            client.clone(),
            &profile,
            deployments_path,
            artifacts_path,
            args.redeploy,
            etherscan_api_key,
            mock_address,
        )
        .await?;
    }

    if args.stage_selected(Stage::Storage) {
        deploy_storage_fun(
            client,
            &profile,
            deployments_path,
            artifacts_path,
            args.redeploy,
            etherscan_api_key,
        )
        .await?;
    }

    Ok(())
}

/// Deploy the mock price feed on development networks.
///
/// Persistent networks skip this stage entirely; it is a normal branch,
/// not an error. Returns the mock's address when one is available.
async fn deploy_mocks(
    client: Arc<impl Middleware>,
    profile: &NetworkProfile,
    deployments_path: &str,
    artifacts_path: &str,
    redeploy: bool,
) -> Result<Option<Address>, ScriptError> {
    if profile.kind == NetworkKind::Persistent {
        info!("persistent network, skipping mocks");
        return Ok(None);
    }

    if !redeploy {
        if let Some(existing) = read_deployed_address(
            deployments_path,
            &profile.name,
            MOCK_V3_AGGREGATOR_CONTRACT_KEY,
        )? {
            info!("reusing mock price feed at {existing:#x}");
            return Ok(Some(existing));
        }
    }

    info!("local network detected, deploying mocks");
    let artifact = load_artifact(artifacts_path, MOCK_V3_AGGREGATOR_ARTIFACT)?;

    let record = deploy_contract(
        client,
        MOCK_V3_AGGREGATOR_ARTIFACT,
        &artifact,
        mock_constructor_args(),
        profile.confirmations,
    )
    .await?;

    write_deployed_address(
        deployments_path,
        &profile.name,
        MOCK_V3_AGGREGATOR_CONTRACT_KEY,
        record.address,
    )?;

    Ok(Some(record.address))
}

/// The mock aggregator's constructor arguments: the feed's precision and
/// its signed initial answer
fn mock_constructor_args() -> Vec<Token> {
    vec![
        Token::Uint(U256::from(MOCK_DECIMALS)),
        Token::Int(I256::from(MOCK_INITIAL_ANSWER).into_raw()),
    ]
}

/// Deploy the FundMe contract, wired with the resolved price feed address
async fn deploy_fund_me(
    client: Arc<impl Middleware>,
    profile: &NetworkProfile,
    deployments_path: &str,
    artifacts_path: &str,
    redeploy: bool,
    etherscan_api_key: Option<&str>,
    mock_address: Option<Address>,
) -> Result<(), ScriptError> {
    if !redeploy {
        if let Some(existing) =
            read_deployed_address(deployments_path, &profile.name, FUND_ME_CONTRACT_KEY)?
        {
            info!("reusing FundMe at {existing:#x}");
            return Ok(());
        }
    }

    // When the mocks stage was skipped this run, fall back to a mock
    // recorded by a previous run on this network
    let mock_address = match mock_address {
        Some(address) => Some(address),
        None => read_deployed_address(
            deployments_path,
            &profile.name,
            MOCK_V3_AGGREGATOR_CONTRACT_KEY,
        )?,
    };

    // Resolved before any transaction is submitted so that a misconfigured
    // persistent network aborts the run with nothing deployed
    let price_feed = resolve_price_feed(profile, mock_address)?;
    info!("using price feed at {price_feed:#x}");

    let artifact = load_artifact(artifacts_path, FUND_ME_ARTIFACT)?;
    let constructor_args = vec![Token::Address(price_feed)];

    let record = deploy_contract(
        client,
        FUND_ME_ARTIFACT,
        &artifact,
        constructor_args,
        profile.confirmations,
    )
    .await?;

    write_deployed_address(
        deployments_path,
        &profile.name,
        FUND_ME_CONTRACT_KEY,
        record.address,
    )?;

    verify_contract(
        profile,
        etherscan_api_key,
        FUND_ME_ARTIFACT,
        &artifact,
        record.address,
        &record.constructor_args,
    )
    .await;

    Ok(())
}

/// Deploy the storage layout demo and log its raw storage
async fn deploy_storage_fun(
    client: Arc<impl Middleware>,
    profile: &NetworkProfile,
    deployments_path: &str,
    artifacts_path: &str,
    redeploy: bool,
    etherscan_api_key: Option<&str>,
) -> Result<(), ScriptError> {
    let existing = if redeploy {
        None
    } else {
        read_deployed_address(
            deployments_path,
            &profile.name,
            FUN_WITH_STORAGE_CONTRACT_KEY,
        )?
    };

    let address = match existing {
        Some(address) => {
            info!("reusing FunWithStorage at {address:#x}");
            address
        }
        None => {
            let artifact = load_artifact(artifacts_path, FUN_WITH_STORAGE_ARTIFACT)?;
            let record = deploy_contract(
                client.clone(),
                FUN_WITH_STORAGE_ARTIFACT,
                &artifact,
                vec![],
                profile.confirmations,
            )
            .await?;

            write_deployed_address(
                deployments_path,
                &profile.name,
                FUN_WITH_STORAGE_CONTRACT_KEY,
                record.address,
            )?;

            verify_contract(
                profile,
                etherscan_api_key,
                FUN_WITH_STORAGE_ARTIFACT,
                &artifact,
                record.address,
                &[],
            )
            .await;

            record.address
        }
    };

    inspect_storage(client, address).await
}

/// Log the demo contract's first few slots, plus the manually computed
/// location of its dynamic array data.
///
/// The direct read of slot 2 (the array length) and the read at
/// `keccak256(2)` (the first element) are independent readings and
/// legitimately differ.
async fn inspect_storage(
    client: Arc<impl Middleware>,
    address: Address,
) -> Result<(), ScriptError> {
    info!("logging storage of {address:#x}");
    for reading in read_slots(client.clone(), address, NUM_INSPECTED_SLOTS).await? {
        info!("location {:#x}: {:#x}", reading.slot, reading.value);
    }

    let length = read_slot_at(client.clone(), address, slot_index(ARRAY_BASE_SLOT)).await?;
    info!("array length slot {:#x}: {:#x}", length.slot, length.value);

    let first_element = read_slot_at(client, address, array_data_slot(ARRAY_BASE_SLOT)).await?;
    info!(
        "first array element slot {:#x}: {:#x}",
        first_element.slot, first_element.value
    );

    Ok(())
}

/// Withdraw the funded balance from the FundMe contract recorded for
/// this network
pub(crate) async fn withdraw(
    client: Arc<impl Middleware>,
    network: &str,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let address = read_deployed_address(deployments_path, network, FUND_ME_CONTRACT_KEY)?
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!("no FundMe deployment recorded for {network}"))
        })?;

    info!("withdrawing from FundMe at {address:#x}");
    let fund_me = FundMeContract::new(address, client);

    fund_me
        .withdraw()
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    info!("withdraw complete");

    Ok(())
}
