// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use async_trait::async_trait;
use cosmrs::proto::cosmos::tx::v1beta1::BroadcastMode as ProtoBroadcastMode;

use crate::error::{Error, Result};
use crate::response::TxResponse;

/// Controls how long the node holds the broadcast call.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BroadcastMode {
    /// Return immediately after the transaction is broadcasted without waiting for check results.
    Async,
    /// Wait for the mempool check results before returning from broadcast.
    #[default]
    Sync,
}

impl FromStr for BroadcastMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "async" => Self::Async,
            "sync" => Self::Sync,
            _ => return Err(Error::Encoding(format!("invalid broadcast mode '{s}'"))),
        })
    }
}

impl From<BroadcastMode> for ProtoBroadcastMode {
    fn from(mode: BroadcastMode) -> Self {
        match mode {
            BroadcastMode::Async => ProtoBroadcastMode::Async,
            BroadcastMode::Sync => ProtoBroadcastMode::Sync,
        }
    }
}

/// Provider for submitting transactions and looking up their results.
#[async_trait]
pub trait TxProvider: Send + Sync {
    /// Broadcast signed transaction bytes.
    ///
    /// A non-zero code in the returned response means the node refused the
    /// transaction. Interpreting it is left to the caller.
    async fn broadcast_tx(&self, tx_bytes: Vec<u8>, mode: BroadcastMode) -> Result<TxResponse>;

    /// Returns the result of an included transaction, or `None` if the node
    /// does not know the hash yet.
    async fn get_tx(&self, hash: &str) -> Result<Option<TxResponse>>;
}
