// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use cosmrs::proto::cosmos::base::abci::v1beta1::TxResponse as ProtoTxResponse;
use serde::{Deserialize, Serialize};

/// Codespace of errors registered by the Cosmos SDK itself.
pub const SDK_CODESPACE: &str = "sdk";

/// `ErrOutOfGas` code in the [`SDK_CODESPACE`].
pub const OUT_OF_GAS_CODE: u32 = 11;

/// Text the node places in its diagnostics when gas runs out.
pub const OUT_OF_GAS_TEXT: &str = "out of gas";

/// The node's answer for a broadcast or included transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    /// Block height the transaction was included at (zero before inclusion).
    pub height: i64,
    /// Transaction hash in upper-case hex.
    pub txhash: String,
    /// Namespace for `code`.
    pub codespace: String,
    /// Result code. Zero means success.
    pub code: u32,
    /// Raw diagnostic output of the node.
    pub raw_log: String,
    /// Gas requested by the transaction.
    pub gas_wanted: i64,
    /// Gas consumed by the transaction.
    pub gas_used: i64,
}

impl TxResponse {
    /// Returns true if the result code is zero.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// Returns true if the node reported that the transaction ran out of gas.
    pub fn is_out_of_gas(&self) -> bool {
        !self.is_ok() && is_out_of_gas(&self.codespace, self.code, &self.raw_log)
    }
}

impl From<ProtoTxResponse> for TxResponse {
    fn from(res: ProtoTxResponse) -> Self {
        TxResponse {
            height: res.height,
            txhash: res.txhash,
            codespace: res.codespace,
            code: res.code,
            raw_log: res.raw_log,
            gas_wanted: res.gas_wanted,
            gas_used: res.gas_used,
        }
    }
}

/// Classify a failure as out-of-gas.
///
/// The structured `sdk/11` code is checked first. Modules such as wasm wrap
/// the gas error under their own codespace, so the diagnostic text is
/// matched as a fallback.
pub fn is_out_of_gas(codespace: &str, code: u32, log: &str) -> bool {
    (codespace == SDK_CODESPACE && code == OUT_OF_GAS_CODE) || log.contains(OUT_OF_GAS_TEXT)
}
