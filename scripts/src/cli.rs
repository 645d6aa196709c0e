//! Definitions of CLI arguments and commands for deploy scripts

use std::{
    fmt::{self, Display},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ethers::providers::Middleware;

use crate::{
    commands::{deploy, withdraw},
    errors::ScriptError,
};

/// CLI tool for deploying the FundMe contracts to a target network
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Name of the target network
    #[arg(short, long, default_value = "hardhat")]
    pub network: String,

    /// Path to the file recording deployed contract addresses per network
    #[arg(long, default_value = "deployments.json")]
    pub deployments_path: String,

    /// Path to the directory containing compiled contract artifacts
    #[arg(long, default_value = "artifacts")]
    pub artifacts_path: String,

    /// Block explorer API key; verification is disabled when absent
    #[arg(long, env = "ETHERSCAN_API_KEY")]
    pub etherscan_api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available deploy script commands
#[derive(Subcommand)]
pub enum Command {
    /// Run the selected deployment stages against the target network
    Deploy(DeployArgs),
    /// Withdraw the funded balance from the deployed FundMe contract
    Withdraw,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        network: &str,
        deployments_path: &str,
        artifacts_path: &str,
        etherscan_api_key: Option<&str>,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                deploy(
                    args,
                    client,
                    network,
                    deployments_path,
                    artifacts_path,
                    etherscan_api_key,
                )
                .await
            }
            Command::Withdraw => withdraw(client, network, deployments_path).await,
        }
    }
}

/// Run the selected deployment stages, in dependency order
/// (mocks, then FundMe, then the storage demo)
#[derive(Args)]
pub struct DeployArgs {
    /// The deployment stages to run
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    pub tags: Vec<Stage>,

    /// Redeploy contracts that the deployments file already records
    /// for this network
    #[arg(long)]
    pub redeploy: bool,
}

/// A selectable deployment stage
#[derive(ValueEnum, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Deploy the mock price feed (development networks only)
    Mocks,
    /// Deploy the FundMe contract
    #[value(name = "fundme")]
    FundMe,
    /// Deploy the storage layout demo and log its slots
    Storage,
    /// Run the mocks and FundMe stages
    All,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Mocks => write!(f, "mocks"),
            Stage::FundMe => write!(f, "fundme"),
            Stage::Storage => write!(f, "storage"),
            Stage::All => write!(f, "all"),
        }
    }
}

impl DeployArgs {
    /// Whether the given stage was selected, directly or via `all`.
    ///
    /// `all` covers mocks and FundMe; the storage demo runs only when
    /// asked for by name.
    pub fn stage_selected(&self, stage: Stage) -> bool {
        self.tags.contains(&stage)
            || (self.tags.contains(&Stage::All) && matches!(stage, Stage::Mocks | Stage::FundMe))
    }
}
