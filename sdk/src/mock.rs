// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! In-memory node used by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nibi_provider::cosmrs::AccountId;
use nibi_provider::message::{bank_send, BASE_DENOM};
use nibi_provider::query::{AccountNumbers, QueryProvider};
use nibi_provider::response::TxResponse;
use nibi_provider::tx::{BroadcastMode, TxProvider};
use nibi_provider::util::parse_denom;
use nibi_provider::{Error, Result};

use crate::{ChainClient, SendMsgOptions};

pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const RECIPIENT_MNEMONIC: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";

/// Scripted node.
///
/// Broadcasts are accepted with hash `HASH<n>` unless a result was pushed.
/// Accepted broadcasts bump the sequence. Lookups pop pushed results and
/// return `None` once the script runs out.
#[derive(Default)]
pub struct MockProvider {
    numbers: Mutex<AccountNumbers>,
    account_query_fails: Mutex<bool>,
    broadcast_results: Mutex<VecDeque<Result<TxResponse>>>,
    broadcasts: Mutex<Vec<Vec<u8>>>,
    tx_results: Mutex<VecDeque<Option<TxResponse>>>,
    failing_polls: AtomicUsize,
    poll_delay: Mutex<Duration>,
    pub polls: AtomicUsize,
    pub account_queries: AtomicUsize,
}

impl MockProvider {
    pub fn with_numbers(account_number: u64, sequence: u64) -> Self {
        let provider = MockProvider::default();
        *provider.numbers.lock().unwrap() = AccountNumbers {
            account_number,
            sequence,
        };
        provider
    }

    pub fn sequence(&self) -> u64 {
        self.numbers.lock().unwrap().sequence
    }

    pub fn broadcasts(&self) -> Vec<Vec<u8>> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub fn push_broadcast_result(&self, result: Result<TxResponse>) {
        self.broadcast_results.lock().unwrap().push_back(result);
    }

    pub fn push_tx_result(&self, result: Option<TxResponse>) {
        self.tx_results.lock().unwrap().push_back(result);
    }

    pub fn fail_account_query(&self) {
        *self.account_query_fails.lock().unwrap() = true;
    }

    pub fn fail_next_polls(&self, n: usize) {
        self.failing_polls.store(n, Ordering::SeqCst);
    }

    /// Make every lookup take `delay` before answering.
    pub fn set_poll_delay(&self, delay: Duration) {
        *self.poll_delay.lock().unwrap() = delay;
    }
}

#[async_trait]
impl QueryProvider for MockProvider {
    async fn account_numbers(&self, address: &AccountId) -> Result<AccountNumbers> {
        self.account_queries.fetch_add(1, Ordering::SeqCst);
        if *self.account_query_fails.lock().unwrap() {
            return Err(Error::AccountQuery(format!("account {address} not found")));
        }
        Ok(*self.numbers.lock().unwrap())
    }
}

#[async_trait]
impl TxProvider for MockProvider {
    async fn broadcast_tx(&self, tx_bytes: Vec<u8>, _mode: BroadcastMode) -> Result<TxResponse> {
        let n = {
            let mut broadcasts = self.broadcasts.lock().unwrap();
            broadcasts.push(tx_bytes);
            broadcasts.len() - 1
        };
        let result = self
            .broadcast_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(TxResponse {
                    txhash: format!("HASH{n}"),
                    ..Default::default()
                })
            });
        if matches!(&result, Ok(res) if res.is_ok()) {
            self.numbers.lock().unwrap().sequence += 1;
        }
        result
    }

    async fn get_tx(&self, _hash: &str) -> Result<Option<TxResponse>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.poll_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let failing = self.failing_polls.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_polls.store(failing - 1, Ordering::SeqCst);
            return Err(Error::Rpc {
                code: nibi_provider::tonic::Code::Unavailable,
                message: "node is syncing".into(),
            });
        }
        Ok(self.tx_results.lock().unwrap().pop_front().flatten())
    }
}

/// Returns a client for the local test chain over `provider`.
pub fn test_client(provider: MockProvider) -> ChainClient<MockProvider> {
    ChainClient::new("nibiru-localnet-0".parse().unwrap(), provider)
}

impl ChainClient<MockProvider> {
    /// Returns options transferring funds from the test account to the
    /// recipient account.
    pub fn test_options(&mut self, gas_limit: u64) -> SendMsgOptions {
        let signer = self.get_or_add_account("sender", TEST_MNEMONIC).unwrap();
        let recipient = self
            .get_or_add_account("recipient", RECIPIENT_MNEMONIC)
            .unwrap();
        let msg = bank_send(
            signer.address(),
            recipient.address(),
            1_000_000,
            &parse_denom(BASE_DENOM).unwrap(),
        )
        .unwrap();
        SendMsgOptions {
            messages: vec![msg],
            signer,
            gas_limit,
        }
    }
}

/// Returns an included transaction result.
pub fn included(hash: &str, code: u32, log: &str) -> TxResponse {
    TxResponse {
        height: 100,
        txhash: hash.to_owned(),
        codespace: if code == 0 { "" } else { "sdk" }.to_owned(),
        code,
        raw_log: log.to_owned(),
        ..Default::default()
    }
}

/// Returns an included transaction that ran out of gas.
pub fn out_of_gas(hash: &str) -> TxResponse {
    included(
        hash,
        11,
        "out of gas in location: WriteFlat; gasWanted: 200000, gasUsed: 201234",
    )
}

/// Returns a broadcast response refused by the mempool.
pub fn rejected(code: u32, log: &str) -> TxResponse {
    TxResponse {
        codespace: "sdk".into(),
        code,
        raw_log: log.to_owned(),
        ..Default::default()
    }
}
