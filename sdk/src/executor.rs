// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use nibi_provider::response::TxResponse;
use nibi_provider::{Error, Provider, Result};

use crate::{ChainClient, SendMsgOptions};

/// Bounds the gas retries of [`execute_with_gas_retries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasRetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
}

impl Default for GasRetryPolicy {
    fn default() -> Self {
        GasRetryPolicy { max_retries: 5 }
    }
}

/// Send `options` and retry with double the gas limit while the chain
/// reports that the transaction ran out of gas.
///
/// Returns the included response together with the gas limit that
/// succeeded, which callers can reuse for their next send. A non-zero
/// result code is returned as [`Error::ExecutionFailed`]. Failures not
/// caused by gas are returned without retrying, and running out of gas on
/// the last allowed attempt yields [`Error::ExecutionFailed`].
pub async fn execute_with_gas_retries<P: Provider>(
    client: &ChainClient<P>,
    mut options: SendMsgOptions,
    policy: GasRetryPolicy,
) -> Result<(TxResponse, u64)> {
    let mut attempt = 0;
    loop {
        let failure = match client.send_msg(&options).await {
            Ok(res) if res.is_ok() => return Ok((res, options.gas_limit)),
            Ok(res) => Error::ExecutionFailed {
                code: res.code,
                codespace: res.codespace,
                log: res.raw_log,
                gas_limit: options.gas_limit,
            },
            Err(e) => e,
        };

        if !failure.is_out_of_gas() {
            return Err(failure);
        }
        if attempt >= policy.max_retries {
            tracing::error!(
                gas_limit = options.gas_limit,
                attempt,
                reason = %failure,
                "Execution failed due to out of gas"
            );
            return Err(into_execution_failed(failure, options.gas_limit));
        }

        options.gas_limit = options.gas_limit.saturating_mul(2);
        attempt += 1;
        tracing::warn!(
            gas_limit = options.gas_limit,
            attempt,
            "Retrying due to out of gas"
        );
    }
}

fn into_execution_failed(err: Error, gas_limit: u64) -> Error {
    match err {
        Error::ExecutionFailed { .. } => err,
        Error::Rejected {
            code,
            codespace,
            log,
        } => Error::ExecutionFailed {
            code,
            codespace,
            log,
            gas_limit,
        },
        other => Error::ExecutionFailed {
            code: 0,
            codespace: String::new(),
            log: other.to_string(),
            gas_limit,
        },
    }
}
