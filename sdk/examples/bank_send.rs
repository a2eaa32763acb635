// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::env;

use anyhow::anyhow;

use nibi_provider::message::{bank_send, BASE_DENOM};
use nibi_provider::util::{parse_address, parse_denom};
use nibi_sdk::network::{Network, DEFAULT_CONNECT_TIMEOUT};
use nibi_sdk::{execute_with_gas_retries, SendMsgOptions, DEFAULT_GAS_LIMIT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(anyhow!("usage: bank_send <mnemonic> <recipient>"));
    }
    let mnemonic = &args[1];
    let recipient = parse_address(&args[2])?;

    stderrlog::new()
        .modules(["bank_send", "nibi_sdk", "nibi_provider"])
        .verbosity(2usize)
        .init()?;

    // Use localnet network defaults
    let network = Network::Localnet.get_config();
    let mut client = network
        .connect(DEFAULT_CONNECT_TIMEOUT, Default::default())
        .await?;
    let signer = client.get_or_add_account("sender", mnemonic)?;

    let msg = bank_send(
        signer.address(),
        &recipient,
        1_000_000,
        &parse_denom(BASE_DENOM)?,
    )?;
    let options = SendMsgOptions {
        messages: vec![msg],
        signer,
        gas_limit: DEFAULT_GAS_LIMIT,
    };
    let (res, gas_limit) = execute_with_gas_retries(&client, options, Default::default()).await?;

    println!(
        "Sent 1000000{} to {}: hash={} code={} gas_limit={}",
        BASE_DENOM, recipient, res.txhash, res.code, gas_limit
    );

    Ok(())
}
