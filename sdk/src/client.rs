// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use nibi_provider::cosmrs::tendermint::chain;
use nibi_provider::cosmrs::tx::{Body, SignDoc, SignerInfo};
use nibi_provider::cosmrs::AccountId;
use nibi_provider::message::fee;
use nibi_provider::query::AccountNumbers;
use nibi_provider::response::TxResponse;
use nibi_provider::util::parse_denom;
use nibi_provider::{Error, Provider, Result};
use nibi_signer::key::FULL_FUNDRAISER_PATH;
use nibi_signer::{Keyring, Record};
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{ClientConfig, SendMsgOptions};

/// Signs, broadcasts and confirms transactions for one chain.
///
/// Keys live in an in-memory [`Keyring`] that is only mutated through
/// `&mut self`. Sends take `&self` and may run concurrently; sends from the
/// same account are serialized by the account's [`Record::lock`].
pub struct ChainClient<P> {
    chain_id: chain::Id,
    keyring: Keyring,
    provider: P,
    config: ClientConfig,
}

impl<P: Provider> ChainClient<P> {
    /// Create a client with the default [`ClientConfig`].
    pub fn new(chain_id: chain::Id, provider: P) -> Self {
        Self::with_config(chain_id, provider, ClientConfig::default())
    }

    /// Create a client with a custom [`ClientConfig`].
    pub fn with_config(chain_id: chain::Id, provider: P, config: ClientConfig) -> Self {
        let keyring = Keyring::new_in_memory(config.account_prefix.clone());
        ChainClient {
            chain_id,
            keyring,
            provider,
            config,
        }
    }

    pub fn chain_id(&self) -> &chain::Id {
        &self.chain_id
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the record stored under `uid`, deriving and storing it from
    /// `mnemonic` if absent.
    ///
    /// An existing record is returned as is, even if `mnemonic` differs.
    pub fn get_or_add_account(&mut self, uid: &str, mnemonic: &str) -> Result<Record> {
        match self.keyring.key(uid) {
            Ok(record) => return Ok(record),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
        let record = self
            .keyring
            .new_account(uid, mnemonic, FULL_FUNDRAISER_PATH)?;
        tracing::debug!(uid, address = %record.address(), "Added account to keyring");
        Ok(record)
    }

    /// Returns the current account number and sequence for an address.
    pub async fn account_numbers(&self, address: &AccountId) -> Result<AccountNumbers> {
        self.provider
            .account_numbers(address)
            .await
            .inspect_err(|e| tracing::error!(address = %address, error = %e, "Error getting account"))
    }

    /// Sign and broadcast `options.messages`, then wait for the transaction
    /// to be included.
    ///
    /// The returned response may carry a non-zero code; only a rejection at
    /// broadcast time is turned into an error here.
    pub async fn send_msg(&self, options: &SendMsgOptions) -> Result<TxResponse> {
        self.send_msg_with_cancel(options, &CancellationToken::new())
            .await
    }

    /// Same as [`ChainClient::send_msg`], stopping with [`Error::Cancelled`]
    /// if `cancel` fires while waiting for inclusion.
    pub async fn send_msg_with_cancel(
        &self,
        options: &SendMsgOptions,
        cancel: &CancellationToken,
    ) -> Result<TxResponse> {
        let signer = &options.signer;
        let hash = {
            // Held until the node accepted the tx and bumped its sequence.
            let _guard = signer.lock().await;

            let numbers = self.account_numbers(signer.address()).await?;
            let tx_bytes = self.sign_tx(options, numbers)?;

            let res = self
                .provider
                .broadcast_tx(tx_bytes, self.config.broadcast_mode)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Error broadcasting transaction"))?;
            if !res.is_ok() {
                tracing::error!(
                    code = res.code,
                    codespace = %res.codespace,
                    log = %res.raw_log,
                    "Error broadcasting transaction"
                );
                return Err(Error::Rejected {
                    code: res.code,
                    codespace: res.codespace,
                    log: res.raw_log,
                });
            }
            res.txhash
        };

        tracing::info!(hash = %hash, "Transaction sent. Waiting for response");
        self.wait_for_tx(&hash, cancel).await
    }

    /// Poll the node for the result of `hash` until it is found, the
    /// confirmation timeout elapses, or `cancel` fires.
    ///
    /// The timeout is a deadline for the whole wait: a lookup still in flight
    /// when it passes is dropped. Lookup failures count as misses.
    pub async fn wait_for_tx(&self, hash: &str, cancel: &CancellationToken) -> Result<TxResponse> {
        let period = self.config.poll_interval.max(Duration::from_millis(1));
        let attempts = poll_attempts(self.config.confirmation_timeout, period);
        let start = Instant::now();
        let deadline = start + self.config.confirmation_timeout;
        let mut ticker = interval_at(start + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for attempt in 1..=attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = ticker.tick() => {}
                _ = sleep_until(deadline) => break,
            }
            let lookup = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                res = self.provider.get_tx(hash) => res,
                _ = sleep_until(deadline) => break,
            };
            match lookup {
                Ok(Some(res)) => {
                    tracing::info!(hash, code = res.code, height = res.height, "Transaction included");
                    return Ok(res);
                }
                Ok(None) => tracing::debug!(hash, attempt, "Transaction not found yet"),
                Err(e) => tracing::debug!(hash, attempt, error = %e, "Error looking up transaction"),
            }
        }

        tracing::warn!(hash, elapsed = ?start.elapsed(), "Transaction not confirmed in time");
        Err(Error::ConfirmationTimeout {
            hash: hash.to_owned(),
            timeout: self.config.confirmation_timeout,
        })
    }

    /// Build, sign and encode a single-signer transaction.
    fn sign_tx(&self, options: &SendMsgOptions, numbers: AccountNumbers) -> Result<Vec<u8>> {
        let signer = &options.signer;
        let body = Body::new(options.messages.clone(), "", 0u32);
        let fee = fee(
            options.gas_limit,
            self.config.gas_per_fee_unit,
            &parse_denom(&self.config.denom)?,
            signer.address().clone(),
        );
        let auth_info =
            SignerInfo::single_direct(Some(signer.public_key()), numbers.sequence).auth_info(fee);
        let sign_doc = SignDoc::new(&body, &auth_info, &self.chain_id, numbers.account_number)
            .map_err(|e| Error::Signing(e.to_string()))?;

        // The alias must resolve to the same key in this keyring.
        let record = self.keyring.key(signer.name())?;
        if record.address() != signer.address() {
            return Err(Error::Credential(format!(
                "key '{}' in keyring has address {}, not {}",
                signer.name(),
                record.address(),
                signer.address()
            )));
        }
        let raw = self.keyring.sign(signer.name(), sign_doc)?;
        raw.to_bytes().map_err(|e| Error::Signing(e.to_string()))
    }
}

/// Number of lookups that fit in `timeout` at `period` spacing, at least one.
fn poll_attempts(timeout: Duration, period: Duration) -> u32 {
    let attempts = timeout.as_nanos() / period.as_nanos().max(1);
    u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
}
