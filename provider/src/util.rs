// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use cosmrs::tendermint::chain;
use cosmrs::{AccountId, Coin, Denom};

use crate::error::{Error, Result};

/// Bech32 prefix of account addresses.
pub const ACCOUNT_PREFIX: &str = "nibi";

/// Parse a bech32 account address with the chain's prefix.
pub fn parse_address(s: &str) -> Result<AccountId> {
    let addr = AccountId::from_str(s)
        .map_err(|e| Error::Encoding(format!("invalid address '{s}': {e}")))?;
    if addr.prefix() != ACCOUNT_PREFIX {
        return Err(Error::Encoding(format!(
            "address '{s}' does not have the '{ACCOUNT_PREFIX}' prefix"
        )));
    }
    Ok(addr)
}

/// Parse a chain ID from string.
pub fn parse_chain_id(s: &str) -> Result<chain::Id> {
    chain::Id::from_str(s).map_err(|e| Error::Encoding(format!("invalid chain ID '{s}': {e}")))
}

/// Parse a denomination from string.
pub fn parse_denom(s: &str) -> Result<Denom> {
    Denom::from_str(s).map_err(|e| Error::Encoding(format!("invalid denom '{s}': {e}")))
}

/// Parse a coin such as `1000000unibi`.
pub fn parse_coin(s: &str) -> Result<Coin> {
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| Error::Encoding(format!("coin '{s}' has no denom")))?;
    let (amount, denom) = s.split_at(split);
    let amount = amount
        .parse::<u128>()
        .map_err(|e| Error::Encoding(format!("invalid amount in coin '{s}': {e}")))?;
    Ok(Coin {
        denom: parse_denom(denom)?,
        amount,
    })
}
