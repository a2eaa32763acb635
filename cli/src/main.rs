// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stderrlog::Timestamp;

use nibi_provider::tx::BroadcastMode as SdkBroadcastMode;
use nibi_provider::GrpcProvider;
use nibi_sdk::network::{Network as SdkNetwork, NetworkConfig};
use nibi_sdk::{ChainClient, ClientConfig, GasRetryPolicy, DEFAULT_GAS_LIMIT};

use crate::account::{handle_account, AccountArgs};
use crate::bank::{handle_bank, BankArgs};

mod account;
mod bank;

#[derive(Clone, Debug, Parser)]
#[command(name = "nibi", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Network presets for chain ID and gRPC URL.
    #[arg(short, long, env = "NIBI_NETWORK", value_enum, default_value_t = Network::Localnet)]
    network: Network,
    /// Network config file (TOML). Takes precedence over the network preset.
    #[arg(long, env = "NIBI_NETWORK_CONFIG")]
    network_config: Option<PathBuf>,
    /// Chain ID signed into transactions.
    #[arg(long, env = "NIBI_CHAIN_ID")]
    chain_id: Option<String>,
    /// Node gRPC URL.
    #[arg(long, env = "NIBI_GRPC_URL")]
    grpc_url: Option<String>,
    /// Use a plaintext gRPC connection instead of TLS.
    #[arg(long, env = "NIBI_GRPC_INSECURE")]
    grpc_insecure: Option<bool>,
    /// Timeout for connecting to the node.
    #[arg(long, env = "NIBI_CONNECT_TIMEOUT", value_parser = humantime::parse_duration, default_value = "10s")]
    connect_timeout: Duration,
    /// Logging verbosity (repeat for more verbose logging).
    #[arg(short, long, env = "NIBI_LOG_VERBOSITY", action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Silence logging.
    #[arg(short, long, env = "NIBI_LOG_QUIET", default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
enum Commands {
    /// Account related commands.
    #[clap(alias = "accounts")]
    Account(AccountArgs),
    /// Bank related commands.
    Bank(BankArgs),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Network {
    /// Network presets for mainnet.
    Mainnet,
    /// Network presets for the public testnet.
    Testnet,
    /// Network presets for a local single-node network.
    Localnet,
}

impl Network {
    pub fn get(&self) -> SdkNetwork {
        match self {
            Network::Mainnet => SdkNetwork::Mainnet,
            Network::Testnet => SdkNetwork::Testnet,
            Network::Localnet => SdkNetwork::Localnet,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum BroadcastMode {
    /// Return immediately after the transaction is broadcasted without waiting for check results.
    Async,
    /// Wait for the check results before returning from broadcast.
    Sync,
}

impl BroadcastMode {
    pub fn get(&self) -> SdkBroadcastMode {
        match self {
            BroadcastMode::Async => SdkBroadcastMode::Async,
            BroadcastMode::Sync => SdkBroadcastMode::Sync,
        }
    }
}

#[derive(Clone, Debug, Args)]
struct TxArgs {
    /// Initial gas limit for the transaction.
    /// The limit is doubled each time the transaction runs out of gas.
    #[arg(long, env = "NIBI_GAS_LIMIT", default_value_t = DEFAULT_GAS_LIMIT)]
    gas_limit: u64,
    /// Maximum number of retries with a doubled gas limit.
    #[arg(long, env = "NIBI_MAX_GAS_RETRIES", default_value_t = GasRetryPolicy::default().max_retries)]
    max_gas_retries: u32,
    /// Broadcast mode for the transaction.
    #[arg(short, long, value_enum, env = "NIBI_BROADCAST_MODE", default_value_t = BroadcastMode::Sync)]
    broadcast_mode: BroadcastMode,
    /// Delay between lookups while waiting for the transaction to be included.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
    poll_interval: Duration,
    /// How long to wait for the transaction to be included.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    confirmation_timeout: Duration,
}

impl TxArgs {
    /// Creates the client config from tx related CLI arguments.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            broadcast_mode: self.broadcast_mode.get(),
            poll_interval: self.poll_interval,
            confirmation_timeout: self.confirmation_timeout,
            ..Default::default()
        }
    }

    /// Creates the gas retry policy from tx related CLI arguments.
    pub fn to_retry_policy(&self) -> GasRetryPolicy {
        GasRetryPolicy {
            max_retries: self.max_gas_retries,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .modules([module_path!(), "nibi_sdk", "nibi_provider"])
        .quiet(cli.quiet)
        .verbosity(cli.verbosity as usize)
        .timestamp(Timestamp::Millisecond)
        .init()?;

    match &cli.command.clone() {
        Commands::Account(args) => handle_account(cli, args).await,
        Commands::Bank(args) => handle_bank(cli, args).await,
    }
}

/// Returns the network config from the config file or preset, with overrides applied.
fn get_network_config(cli: &Cli) -> anyhow::Result<NetworkConfig> {
    let mut config = match &cli.network_config {
        Some(path) => NetworkConfig::from_file(path)?,
        None => cli.network.get().get_config(),
    };
    if let Some(chain_id) = &cli.chain_id {
        config.chain_id = chain_id.clone();
    }
    if let Some(grpc_url) = &cli.grpc_url {
        config.grpc_url = grpc_url.clone();
    }
    if let Some(insecure) = cli.grpc_insecure {
        config.grpc_insecure = insecure;
    }
    Ok(config)
}

/// Connects to the configured node and returns a chain client.
async fn connect(cli: &Cli, config: ClientConfig) -> anyhow::Result<ChainClient<GrpcProvider>> {
    let network = get_network_config(cli)?;
    tracing::info!(
        chain_id = %network.chain_id,
        grpc_url = %network.grpc_url,
        grpc_insecure = network.grpc_insecure,
        "Creating chain client, connecting by gRPC"
    );
    Ok(network.connect(cli.connect_timeout, config).await?)
}

/// Print serializable to stdout as pretty formatted JSON.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&value)?;
    println!("{}", json);
    Ok(())
}
