// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Nibi SDK
//!
//! The top-level interface for signing, broadcasting and confirming Nibiru
//! transactions, with retries on gas exhaustion.

use std::time::Duration;

use nibi_provider::cosmrs::Any;
use nibi_provider::message::{BASE_DENOM, GAS_PER_FEE_UNIT};
use nibi_provider::tx::BroadcastMode;
use nibi_provider::util::ACCOUNT_PREFIX;
use nibi_signer::Record;

pub mod client;
pub mod executor;
pub mod network;

#[cfg(test)]
mod mock;

pub use client::ChainClient;
pub use executor::{execute_with_gas_retries, GasRetryPolicy};

/// Gas limit used when the caller has no better estimate.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Arguments for sending a set of messages in one transaction.
#[derive(Clone, Debug)]
pub struct SendMsgOptions {
    /// Messages to include, in order.
    pub messages: Vec<Any>,
    /// Credential that signs and pays for the transaction.
    pub signer: Record,
    /// Gas limit declared for the transaction.
    pub gas_limit: u64,
}

/// Settings shared by every send of a [`ChainClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Denomination fees are paid in.
    pub denom: String,
    /// Units of gas paid for by one unit of `denom`.
    pub gas_per_fee_unit: u64,
    /// Bech32 prefix used for keyring addresses.
    pub account_prefix: String,
    /// Broadcast mode for transactions.
    pub broadcast_mode: BroadcastMode,
    /// Delay between transaction lookups while waiting for inclusion.
    pub poll_interval: Duration,
    /// How long to wait for inclusion before giving up.
    pub confirmation_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            denom: BASE_DENOM.to_owned(),
            gas_per_fee_unit: GAS_PER_FEE_UNIT,
            account_prefix: ACCOUNT_PREFIX.to_owned(),
            broadcast_mode: BroadcastMode::Sync,
            poll_interval: Duration::from_secs(1),
            confirmation_timeout: Duration::from_secs(60),
        }
    }
}
