//! Entrypoint for the FundMe deploy scripts

use clap::Parser;
use fundme_scripts::{cli::Cli, errors::ScriptError, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        deployments_path,
        artifacts_path,
        etherscan_api_key,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;

    command
        .run(
            client,
            &network,
            &deployments_path,
            &artifacts_path,
            etherscan_api_key.as_deref(),
        )
        .await
}
