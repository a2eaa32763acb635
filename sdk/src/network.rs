// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;
use std::time::Duration;

use nibi_provider::cosmrs::tendermint::chain;
use nibi_provider::util::parse_chain_id;
use nibi_provider::{Error, GrpcProvider, Result};
use serde::{Deserialize, Serialize};

use crate::{ChainClient, ClientConfig};

const MAINNET_CHAIN_ID: &str = "cataclysm-1";
const MAINNET_GRPC_URL: &str = "grpc.nibiru.fi:443";

const TESTNET_CHAIN_ID: &str = "nibiru-testnet-2";
const TESTNET_GRPC_URL: &str = "grpc.testnet-2.nibiru.fi:443";

const LOCALNET_CHAIN_ID: &str = "nibiru-localnet-0";
const LOCALNET_GRPC_URL: &str = "localhost:9090";

/// Default time allowed for dialing a node.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Network presets for chain ID and gRPC endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Network {
    /// Network presets for mainnet.
    Mainnet,
    /// Network presets for the public testnet.
    Testnet,
    /// Network presets for a local single-node network.
    Localnet,
}

impl Network {
    /// Returns the config of the network.
    pub fn get_config(&self) -> NetworkConfig {
        match self {
            Network::Mainnet => NetworkConfig {
                chain_id: MAINNET_CHAIN_ID.to_owned(),
                grpc_url: MAINNET_GRPC_URL.to_owned(),
                grpc_insecure: false,
            },
            Network::Testnet => NetworkConfig {
                chain_id: TESTNET_CHAIN_ID.to_owned(),
                grpc_url: TESTNET_GRPC_URL.to_owned(),
                grpc_insecure: false,
            },
            Network::Localnet => NetworkConfig {
                chain_id: LOCALNET_CHAIN_ID.to_owned(),
                grpc_url: LOCALNET_GRPC_URL.to_owned(),
                grpc_insecure: true,
            },
        }
    }
}

/// Where and how to reach a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain identity signed into every transaction.
    pub chain_id: String,
    /// gRPC endpoint of a node, with or without scheme.
    pub grpc_url: String,
    /// Use a plaintext connection instead of TLS.
    #[serde(default)]
    pub grpc_insecure: bool,
}

impl NetworkConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Encoding(format!("error reading {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse a config from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Encoding(format!("invalid network config: {e}")))
    }

    /// Returns the parsed chain ID.
    pub fn chain_id(&self) -> Result<chain::Id> {
        parse_chain_id(&self.chain_id)
    }

    /// Connect to the network's node and return a [`ChainClient`] for it.
    pub async fn connect(
        &self,
        timeout: Duration,
        config: ClientConfig,
    ) -> Result<ChainClient<GrpcProvider>> {
        let chain_id = self.chain_id()?;
        let provider = GrpcProvider::connect(&self.grpc_url, self.grpc_insecure, timeout).await?;
        Ok(ChainClient::with_config(chain_id, provider, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let local = Network::Localnet.get_config();
        assert_eq!(local.chain_id, "nibiru-localnet-0");
        assert_eq!(local.grpc_url, "localhost:9090");
        assert!(local.grpc_insecure);
        assert!(!Network::Mainnet.get_config().grpc_insecure);
        assert!(!Network::Testnet.get_config().grpc_insecure);

        for network in [Network::Mainnet, Network::Testnet, Network::Localnet] {
            assert!(network.get_config().chain_id().is_ok());
        }
    }

    #[test]
    fn test_from_toml() {
        let config = NetworkConfig::from_toml(
            r#"
            chain_id = "nibiru-localnet-0"
            grpc_url = "127.0.0.1:9090"
            "#,
        )
        .unwrap();
        assert_eq!(config.grpc_url, "127.0.0.1:9090");
        assert!(!config.grpc_insecure);

        let err = NetworkConfig::from_toml("chain_id = 1").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = NetworkConfig::from_file("/nonexistent/network.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/network.toml"));
    }

    #[tokio::test]
    async fn test_connect_invalid_chain_id() {
        let config = NetworkConfig {
            chain_id: String::new(),
            ..Network::Localnet.get_config()
        };
        let res = config
            .connect(Duration::from_millis(10), ClientConfig::default())
            .await;
        assert!(matches!(res, Err(Error::Encoding(_))));
    }
}
