//! Utilities for the deploy scripts: client setup, artifact loading, and
//! the persisted deployment registry.

use std::{
    fs::{self, File},
    io::Read,
    path::PathBuf,
    str::FromStr,
    sync::Arc,
};

use ethers::{
    abi::{Abi, Address, Token},
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::Bytes,
};
use json::JsonValue;
use serde::Deserialize;
use tracing::info;

use crate::{
    constants::{ARTIFACT_EXTENSION, DEPLOYMENTS_KEY},
    errors::ScriptError,
    types::DeploymentRecord,
};

/// Sets up the client with which all deployment transactions are sent,
/// from the deployer's private key and the network RPC URL.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// A compiled contract artifact, as emitted by the Solidity toolchain
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the contract
    #[serde(default)]
    pub contract_name: Option<String>,
    /// The contract's ABI
    pub abi: Abi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
    /// The flattened contract source, when the artifact carries it.
    /// Required for block explorer verification only.
    #[serde(default)]
    pub source_code: Option<String>,
    /// The solc version the contract was compiled with, when the
    /// artifact carries it. Required for block explorer verification only.
    #[serde(default)]
    pub compiler_version: Option<String>,
}

/// Load the compilation artifact for the named contract from the
/// artifacts directory
pub fn load_artifact(artifacts_path: &str, name: &str) -> Result<Artifact, ScriptError> {
    let path = PathBuf::from(artifacts_path).join(format!("{name}.{ARTIFACT_EXTENSION}"));

    let mut file_contents = String::new();
    File::open(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    serde_json::from_str(&file_contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// The effective confirmation count for a deployment; at least one
/// confirmation is always awaited
fn effective_confirmations(requested: usize) -> usize {
    requested.max(1)
}

/// Deploy the given artifact with the given constructor arguments,
/// blocking until the requested number of confirmations (at least one)
/// has been observed on top of the deployment block.
pub async fn deploy_contract(
    client: Arc<impl Middleware>,
    name: &str,
    artifact: &Artifact,
    constructor_args: Vec<Token>,
    confirmations: usize,
) -> Result<DeploymentRecord, ScriptError> {
    let confirmations = effective_confirmations(confirmations);
    let factory = ContractFactory::new(
        artifact.abi.clone(),
        artifact.bytecode.clone(),
        client.clone(),
    );

    let contract = factory
        .deploy_tokens(constructor_args.clone())
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .confirmations(confirmations)
        .send()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    info!(
        "{} deployed at {:#x} ({} confirmations)",
        name,
        contract.address(),
        confirmations
    );

    Ok(DeploymentRecord {
        name: name.to_string(),
        address: contract.address(),
        constructor_args,
        confirmations,
    })
}

/// Parse the `deployments.json` file at the given path
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Look up a previously deployed contract address in the deployments file.
///
/// A missing file, network, or contract entry means the contract has not
/// been deployed on this network yet; only a malformed file is an error.
pub fn read_deployed_address(
    file_path: &str,
    network: &str,
    contract_key: &str,
) -> Result<Option<Address>, ScriptError> {
    if !PathBuf::from(file_path).exists() {
        return Ok(None);
    }
    let parsed_json = get_json_from_file(file_path)?;

    match parsed_json[DEPLOYMENTS_KEY][network][contract_key].as_str() {
        Some(addr) => Address::from_str(addr)
            .map(Some)
            .map_err(|e| ScriptError::ReadDeployments(e.to_string())),
        None => Ok(None),
    }
}

/// Record a deployed contract address in the deployments file,
/// creating the file if it does not exist
pub fn write_deployed_address(
    file_path: &str,
    network: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][network][contract_key] =
        JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}
