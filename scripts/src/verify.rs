//! Best-effort block explorer verification.
//!
//! Verification is a nicety for public networks: it is skipped entirely on
//! development networks or when no API key is configured, and any failure
//! from the explorer service (already verified, rate limit, transport) is
//! logged and swallowed rather than failing the deployment run.

use ethers::abi::{encode, Address, Token};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    chains::{NetworkKind, NetworkProfile},
    errors::ScriptError,
    types::VerificationStatus,
    utils::Artifact,
};

/// The code format field for a flattened single-file source submission
const CODE_FORMAT: &str = "solidity-single-file";

/// The response envelope of an Etherscan-compatible verification API
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    /// "1" on success, "0" on failure
    status: String,
    /// The verification request GUID on success, an error message otherwise
    result: String,
}

/// Whether verification should be attempted at all for this network
pub fn should_verify(profile: &NetworkProfile, api_key: Option<&str>) -> bool {
    profile.kind == NetworkKind::Persistent
        && api_key.is_some()
        && profile.explorer_api_url.is_some()
}

/// Submit the deployed contract's source and constructor arguments to the
/// network's block explorer for verification.
///
/// Never raises past the caller: every skip reason and every service
/// failure resolves to [`VerificationStatus::Skipped`].
pub async fn verify_contract(
    profile: &NetworkProfile,
    api_key: Option<&str>,
    name: &str,
    artifact: &Artifact,
    address: Address,
    constructor_args: &[Token],
) -> VerificationStatus {
    if !should_verify(profile, api_key) {
        debug!("skipping verification of {name} on {}", profile.name);
        return VerificationStatus::Skipped;
    }

    // The guard above checked both of these
    let api_key = api_key.unwrap_or_default();
    let api_url = profile.explorer_api_url.unwrap_or_default();

    let (source_code, compiler_version) =
        match (&artifact.source_code, &artifact.compiler_version) {
            (Some(source), Some(version)) => (source, version),
            _ => {
                debug!("artifact for {name} carries no source, skipping verification");
                return VerificationStatus::Skipped;
            }
        };

    match submit_verification(
        api_url,
        api_key,
        name,
        source_code,
        compiler_version,
        address,
        constructor_args,
    )
    .await
    {
        Ok(guid) => {
            info!("verification of {name} submitted: {guid}");
            VerificationStatus::Submitted
        }
        Err(e) => {
            warn!("verification of {name} failed: {e}");
            VerificationStatus::Skipped
        }
    }
}

/// Post the verification request to the explorer API, returning the
/// request GUID the explorer assigns
async fn submit_verification(
    api_url: &str,
    api_key: &str,
    name: &str,
    source_code: &str,
    compiler_version: &str,
    address: Address,
    constructor_args: &[Token],
) -> Result<String, ScriptError> {
    let encoded_args = hex::encode(encode(constructor_args));

    let params = [
        ("apikey", api_key),
        ("module", "contract"),
        ("action", "verifysourcecode"),
        ("codeformat", CODE_FORMAT),
        ("contractaddress", &format!("{address:#x}")),
        ("contractname", name),
        ("sourceCode", source_code),
        ("compilerversion", compiler_version),
        // Etherscan's historical misspelling of "arguments"
        ("constructorArguements", &encoded_args),
    ];

    let response: ExplorerResponse = reqwest::Client::new()
        .post(api_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .json()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if response.status != "1" {
        return Err(ScriptError::ContractInteraction(response.result));
    }

    Ok(response.result)
}

#[cfg(test)]
/// Tests for the verification guards
mod tests {
    use ethers::abi::Address;

    use super::{should_verify, verify_contract};
    use crate::{chains::network_profile, types::VerificationStatus, utils::Artifact};

    /// An artifact with no source attached
    fn bare_artifact() -> Artifact {
        serde_json::from_str(r#"{ "abi": [], "bytecode": "0x00" }"#).unwrap()
    }

    #[test]
    /// Verification requires a persistent network, an API key, and an
    /// explorer endpoint
    fn test_should_verify_guards() {
        let dev = network_profile("localhost");
        let testnet = network_profile("sepolia");
        let unknown = network_profile("public-testnet");

        assert!(!should_verify(&dev, Some("key")));
        assert!(!should_verify(&testnet, None));
        // Unknown persistent networks have no explorer endpoint configured
        assert!(!should_verify(&unknown, Some("key")));
        assert!(should_verify(&testnet, Some("key")));
    }

    #[tokio::test]
    /// An absent API key resolves to a skip
    async fn test_verify_skips_without_api_key() {
        // No HTTP is attempted on the skip path, so this resolves
        // without a network
        let status = verify_contract(
            &network_profile("sepolia"),
            None,
            "FundMe",
            &bare_artifact(),
            Address::zero(),
            &[],
        )
        .await;

        assert_eq!(status, VerificationStatus::Skipped);
    }

    #[tokio::test]
    /// Development networks resolve to a skip
    async fn test_verify_skips_on_development() {
        let status = verify_contract(
            &network_profile("hardhat"),
            Some("key"),
            "FundMe",
            &bare_artifact(),
            Address::zero(),
            &[],
        )
        .await;

        assert_eq!(status, VerificationStatus::Skipped);
    }
}
