//! Network classification and per-network deployment configuration

use std::str::FromStr;

use ethers::abi::Address;

use crate::{constants::DEFAULT_CONFIRMATIONS, errors::ScriptError};

/// The names of the local, ephemeral networks
const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// Whether a network is a local simulation or a long-lived chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// An ephemeral, locally simulated chain, reset on each run
    Development,
    /// A long-lived test or production chain
    Persistent,
}

/// Per-network deployment configuration
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    /// The network name
    pub name: String,
    /// The chain ID of the network, if known
    pub chain_id: Option<u64>,
    /// Whether the network is a development or persistent chain
    pub kind: NetworkKind,
    /// The number of confirmations to await on each deployment
    pub confirmations: usize,
    /// The ETH/USD price feed address on this network, if one exists
    pub eth_usd_price_feed: Option<&'static str>,
    /// The block explorer verification API endpoint, if one exists
    pub explorer_api_url: Option<&'static str>,
}

/// Classify a network name as development or persistent.
///
/// Unmatched names default to persistent: deploying to an unknown
/// network must never be mistaken for a local simulation.
pub fn classify(network: &str) -> NetworkKind {
    if DEVELOPMENT_CHAINS.contains(&network) {
        NetworkKind::Development
    } else {
        NetworkKind::Persistent
    }
}

/// Look up the deployment profile for the given network name.
///
/// Unknown persistent networks get a bare profile with no price feed
/// configured, which causes price feed resolution to fail fast.
pub fn network_profile(network: &str) -> NetworkProfile {
    let (chain_id, confirmations, eth_usd_price_feed, explorer_api_url) = match network {
        "hardhat" | "localhost" => (Some(31337), DEFAULT_CONFIRMATIONS, None, None),
        "sepolia" => (
            Some(11_155_111),
            6,
            Some("0x694AA1769357215DE4FAC081bf1f309aDC325306"),
            Some("https://api-sepolia.etherscan.io/api"),
        ),
        "goerli" => (
            Some(5),
            6,
            Some("0xD4a33860578De61DBAbDc8BFdb98FD742fA7028e"),
            Some("https://api-goerli.etherscan.io/api"),
        ),
        "polygon" => (
            Some(137),
            DEFAULT_CONFIRMATIONS,
            Some("0xF9680D99D6C9589e2a93a78A04A279e509205945"),
            Some("https://api.polygonscan.com/api"),
        ),
        _ => (None, DEFAULT_CONFIRMATIONS, None, None),
    };

    NetworkProfile {
        name: network.to_string(),
        chain_id,
        kind: classify(network),
        confirmations,
        eth_usd_price_feed,
        explorer_api_url,
    }
}

/// Resolve the price feed address the FundMe constructor should be wired with.
///
/// On development networks this is the just-provisioned mock; on persistent
/// networks it is the statically configured feed. A persistent network with
/// no configured feed is a fatal configuration error, checked before any
/// deployment transaction is submitted.
pub fn resolve_price_feed(
    profile: &NetworkProfile,
    mock_address: Option<Address>,
) -> Result<Address, ScriptError> {
    if profile.kind == NetworkKind::Development {
        if let Some(address) = mock_address {
            return Ok(address);
        }
    }

    let feed = profile
        .eth_usd_price_feed
        .ok_or_else(|| ScriptError::MissingPriceFeed(profile.name.clone()))?;

    Address::from_str(feed).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

#[cfg(test)]
/// Tests for network classification and price feed resolution
mod tests {
    use ethers::abi::Address;

    use super::{classify, network_profile, resolve_price_feed, NetworkKind};
    use crate::errors::ScriptError;

    #[test]
    /// Local simulation networks classify as development
    fn test_classify_development_chains() {
        assert_eq!(classify("hardhat"), NetworkKind::Development);
        assert_eq!(classify("localhost"), NetworkKind::Development);
    }

    #[test]
    /// Known and unknown remote networks classify as persistent
    fn test_classify_defaults_to_persistent() {
        assert_eq!(classify("sepolia"), NetworkKind::Persistent);
        assert_eq!(classify("public-testnet"), NetworkKind::Persistent);
    }

    #[test]
    /// A provisioned mock wins on development networks
    fn test_resolve_price_feed_prefers_mock_on_development() {
        let profile = network_profile("localhost");
        let mock = Address::random();

        let resolved = resolve_price_feed(&profile, Some(mock)).unwrap();
        assert_eq!(resolved, mock);
    }

    #[test]
    /// Persistent networks always use the statically configured feed
    fn test_resolve_price_feed_uses_configured_feed_on_persistent() {
        let profile = network_profile("sepolia");

        // A mock address must never shadow the configured feed on a
        // persistent network
        let resolved = resolve_price_feed(&profile, Some(Address::random())).unwrap();
        assert_eq!(
            format!("{resolved:#x}"),
            "0x694aa1769357215de4fac081bf1f309adc325306"
        );
    }

    #[test]
    /// A persistent network without a configured feed fails fast
    fn test_resolve_price_feed_fails_without_configuration() {
        let profile = network_profile("public-testnet");

        let res = resolve_price_feed(&profile, None);
        assert!(matches!(res, Err(ScriptError::MissingPriceFeed(_))));
    }

    #[test]
    /// Development profiles carry no explorer endpoint
    fn test_development_profile_has_no_explorer() {
        let profile = network_profile("hardhat");
        assert!(profile.explorer_api_url.is_none());
        assert_eq!(profile.confirmations, 1);
    }
}
