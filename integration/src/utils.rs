//! Utilities for running integration tests

use std::sync::Arc;

use ethers::{
    abi::Address,
    providers::Middleware,
    signers::{LocalWallet, Signer},
    types::{TransactionReceipt, TransactionRequest, U256},
};
use eyre::{eyre, Result};
use fundme_scripts::{
    constants::{
        FUND_ME_CONTRACT_KEY, FUN_WITH_STORAGE_CONTRACT_KEY, MOCK_V3_AGGREGATOR_CONTRACT_KEY,
    },
    utils::{read_deployed_address, setup_client},
};
use rand::thread_rng;

use crate::{
    abis::{FundMeContract, MockV3AggregatorContract},
    constants::FUNDER_SEED_VALUE,
};

/// Shared state for a single integration test run
pub(crate) struct TestContext<M: Middleware> {
    /// The client the deployer's transactions are sent with
    pub(crate) client: Arc<M>,
    /// The network the contracts were deployed to
    pub(crate) network: String,
    /// The path to the deployments file
    pub(crate) deployments_file: String,
    /// The devnet RPC URL, used to construct extra funder clients
    pub(crate) rpc_url: String,
}

impl<M: Middleware + 'static> TestContext<M> {
    /// Construct a test context
    pub(crate) fn new(
        client: Arc<M>,
        network: &str,
        deployments_file: &str,
        rpc_url: &str,
    ) -> Self {
        Self {
            client,
            network: network.to_string(),
            deployments_file: deployments_file.to_string(),
            rpc_url: rpc_url.to_string(),
        }
    }

    /// Look up a deployed contract address in the deployments file
    fn deployed_address(&self, contract_key: &str) -> Result<Address> {
        read_deployed_address(&self.deployments_file, &self.network, contract_key)?.ok_or_else(
            || {
                eyre!(
                    "no `{}` recorded for network `{}`, run the deploy scripts first",
                    contract_key,
                    self.network
                )
            },
        )
    }

    /// The deployed FundMe contract, bound to the deployer's client
    pub(crate) fn fund_me(&self) -> Result<FundMeContract<M>> {
        Ok(FundMeContract::new(
            self.deployed_address(FUND_ME_CONTRACT_KEY)?,
            self.client.clone(),
        ))
    }

    /// The address of the deployed mock price feed
    pub(crate) fn mock_address(&self) -> Result<Address> {
        self.deployed_address(MOCK_V3_AGGREGATOR_CONTRACT_KEY)
    }

    /// The deployed mock price feed, bound to the deployer's client
    pub(crate) fn mock_aggregator(&self) -> Result<MockV3AggregatorContract<M>> {
        Ok(MockV3AggregatorContract::new(
            self.mock_address()?,
            self.client.clone(),
        ))
    }

    /// The address of the deployed storage demo contract
    pub(crate) fn fun_with_storage_address(&self) -> Result<Address> {
        self.deployed_address(FUN_WITH_STORAGE_CONTRACT_KEY)
    }

    /// The deployer's address
    pub(crate) fn deployer_address(&self) -> Result<Address> {
        self.client
            .default_sender()
            .ok_or_else(|| eyre!("client does not have a sender attached"))
    }

    /// The current balance of the given address
    pub(crate) async fn balance_of(&self, address: Address) -> Result<U256> {
        self.client
            .get_balance(address, None /* block */)
            .await
            .map_err(|e| eyre!("failed fetching balance: {e}"))
    }

    /// Create a fresh account, seed it with ETH from the deployer, and
    /// return a client signing with it
    pub(crate) async fn create_funder(&self) -> Result<Arc<impl Middleware>> {
        let wallet = LocalWallet::new(&mut thread_rng());

        let seed_tx = TransactionRequest::pay(wallet.address(), U256::from(FUNDER_SEED_VALUE));
        self.client
            .send_transaction(seed_tx, None /* block */)
            .await
            .map_err(|e| eyre!("failed seeding funder: {e}"))?
            .await?;

        let priv_key = hex::encode(wallet.signer().to_bytes());
        Ok(setup_client(&priv_key, &self.rpc_url).await?)
    }
}

/// The total gas cost paid for a mined transaction
pub(crate) fn gas_cost(receipt: &TransactionReceipt) -> U256 {
    receipt.gas_used.unwrap_or_default() * receipt.effective_gas_price.unwrap_or_default()
}
