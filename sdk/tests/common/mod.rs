use std::env;

use nibi_sdk::network::{Network, NetworkConfig};

/// Returns the target network, or `None` if live tests are not configured.
pub fn get_network() -> Option<NetworkConfig> {
    let net_name = env::var("TEST_TARGET_NETWORK").ok()?;

    match net_name.as_str() {
        "localnet" => Some(Network::Localnet.get_config()),
        "testnet" => Some(Network::Testnet.get_config()),
        "mainnet" => Some(Network::Mainnet.get_config()),
        _ => panic!("cannot get test target network config for '{net_name}'"),
    }
}

/// Returns the mnemonic of the funded test runner account.
pub fn get_runner_mnemonic() -> Option<String> {
    env::var("NIBI_MNEMONIC").ok()
}
