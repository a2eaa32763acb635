// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::{error::ErrorKind, Args, CommandFactory, Subcommand};
use serde_json::json;

use nibi_provider::cosmrs::AccountId;
use nibi_provider::util::{parse_address, ACCOUNT_PREFIX};
use nibi_signer::key::{random_mnemonic, FULL_FUNDRAISER_PATH};
use nibi_signer::Keyring;

use crate::{connect, print_json, Cli};

#[derive(Clone, Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum AccountCommands {
    /// Create a new local account from a random mnemonic (account details are NOT sent to the network).
    Create,
    /// Get account number and sequence.
    Info(InfoArgs),
}

#[derive(Clone, Debug, Args)]
struct InfoArgs {
    /// Account mnemonic. The derived address is used if no address is given.
    #[arg(short, long, env = "NIBI_MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,
    /// Account address.
    #[arg(short, long, value_parser = parse_address)]
    address: Option<AccountId>,
}

/// Account commands handler.
pub async fn handle_account(cli: Cli, args: &AccountArgs) -> anyhow::Result<()> {
    match &args.command {
        AccountCommands::Create => {
            let mnemonic = random_mnemonic();
            let mut keyring = Keyring::new_in_memory(ACCOUNT_PREFIX);
            let record = keyring.new_account("new", &mnemonic, FULL_FUNDRAISER_PATH)?;

            print_json(&json!({
                "mnemonic": mnemonic,
                "address": record.address().to_string(),
                "public_key": hex::encode(record.public_key().to_bytes()),
            }))
        }
        AccountCommands::Info(args) => {
            let mut client = connect(&cli, Default::default()).await?;
            let address = match (&args.address, &args.mnemonic) {
                (Some(address), _) => address.clone(),
                (None, Some(mnemonic)) => client
                    .get_or_add_account("account", mnemonic)?
                    .address()
                    .clone(),
                (None, None) => Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "the following required arguments were not provided: --mnemonic OR --address",
                    )
                    .exit(),
            };
            let numbers = client.account_numbers(&address).await?;

            print_json(&json!({
                "address": address.to_string(),
                "account_number": numbers.account_number,
                "sequence": numbers.sequence,
            }))
        }
    }
}
