// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use thiserror::Error;

use crate::response::is_out_of_gas;

/// A result type with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the provider, signer and SDK crates.
///
/// Nothing in the library aborts the process. Callers decide whether a
/// variant is fatal for them.
#[derive(Debug, Error)]
pub enum Error {
    /// Dialing the node failed or did not complete in time.
    #[error("connection error: {0}")]
    Connection(String),

    /// The credential could not be derived, stored or loaded.
    #[error("credential error: {0}")]
    Credential(String),

    /// The account could not be queried or its payload could not be unpacked.
    #[error("account query error: {0}")]
    AccountQuery(String),

    /// Building, signing or encoding the transaction failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// A value could not be parsed or packed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The broadcast call itself failed before the node returned a result.
    #[error("error broadcasting transaction: {0}")]
    Broadcast(String),

    /// The node refused the transaction into its mempool.
    #[error("transaction rejected: code={code} codespace={codespace} log={log}")]
    Rejected {
        code: u32,
        codespace: String,
        log: String,
    },

    /// A query to the node failed.
    #[error("rpc error: code={code:?} message={message}")]
    Rpc { code: tonic::Code, message: String },

    /// No result for the transaction was found in the polling window.
    #[error("transaction {hash} was not confirmed within {timeout:?}")]
    ConfirmationTimeout { hash: String, timeout: Duration },

    /// The transaction was included but its execution failed.
    #[error("execution failed: code={code} codespace={codespace} gas_limit={gas_limit} log={log}")]
    ExecutionFailed {
        code: u32,
        codespace: String,
        log: String,
        gas_limit: u64,
    },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Returns true if the node reported that the transaction ran out of gas.
    pub fn is_out_of_gas(&self) -> bool {
        match self {
            Error::Rejected {
                code,
                codespace,
                log,
            }
            | Error::ExecutionFailed {
                code,
                codespace,
                log,
                ..
            } => is_out_of_gas(codespace, *code, log),
            Error::Broadcast(log) | Error::Signing(log) => is_out_of_gas("", 0, log),
            Error::Rpc { message, .. } => is_out_of_gas("", 0, message),
            _ => false,
        }
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Error::Rpc {
            code: status.code(),
            message: status.message().to_owned(),
        }
    }
}
