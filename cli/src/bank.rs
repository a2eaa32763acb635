// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

use nibi_provider::cosmrs::{AccountId, Coin};
use nibi_provider::message::bank_send;
use nibi_provider::response::TxResponse;
use nibi_provider::util::{parse_address, parse_coin};
use nibi_sdk::{execute_with_gas_retries, SendMsgOptions};

use crate::{connect, print_json, Cli, TxArgs};

#[derive(Clone, Debug, Args)]
pub struct BankArgs {
    #[command(subcommand)]
    command: BankCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum BankCommands {
    /// Send funds to another account.
    Send(SendArgs),
}

#[derive(Clone, Debug, Args)]
struct SendArgs {
    /// Sender mnemonic (BIP-39) for signing transactions.
    #[arg(short, long, env = "NIBI_MNEMONIC", hide_env_values = true)]
    mnemonic: String,
    /// The recipient account address.
    #[arg(long, value_parser = parse_address)]
    to: AccountId,
    /// The amount to send, e.g. 1000000unibi.
    #[arg(value_parser = parse_coin)]
    amount: Coin,
    /// Also write the transaction response as JSON to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    tx_args: TxArgs,
}

#[derive(Serialize)]
struct SendOutput {
    response: TxResponse,
    gas_limit: u64,
}

/// Bank commands handler.
pub async fn handle_bank(cli: Cli, args: &BankArgs) -> anyhow::Result<()> {
    match &args.command {
        BankCommands::Send(args) => {
            let mut client = connect(&cli, args.tx_args.to_client_config()).await?;
            let signer = client.get_or_add_account("sender", &args.mnemonic)?;

            let msg = bank_send(
                signer.address(),
                &args.to,
                args.amount.amount,
                &args.amount.denom,
            )?;
            let options = SendMsgOptions {
                messages: vec![msg],
                signer,
                gas_limit: args.tx_args.gas_limit,
            };
            let (response, gas_limit) =
                execute_with_gas_retries(&client, options, args.tx_args.to_retry_policy()).await?;
            tracing::info!(code = response.code, hash = %response.txhash, gas_limit, "Transaction included");

            let output = SendOutput {
                response,
                gas_limit,
            };
            if let Some(path) = &args.output {
                save_json(&output, path).await?;
            }
            print_json(&output)
        }
    }
}

/// Write serializable to `path` as pretty formatted JSON, creating parent directories.
async fn save_json<T: Serialize>(value: &T, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), "Saved transaction response");
    Ok(())
}
