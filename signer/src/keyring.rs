// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cosmrs::crypto::{secp256k1::SigningKey, PublicKey};
use cosmrs::tx::{Raw, SignDoc};
use cosmrs::AccountId;
use nibi_provider::Error;
use thiserror::Error as ThisError;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::key::derive_signing_key;

/// Errors returned by the [`Keyring`].
#[derive(Debug, ThisError)]
pub enum KeyringError {
    #[error("key '{0}' not found")]
    NotFound(String),
    #[error("key '{0}' already exists")]
    AlreadyExists(String),
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("key derivation failed: {0}")]
    Derivation(String),
    #[error("signing failed: {0}")]
    Signing(String),
}

impl KeyringError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeyringError::NotFound(_))
    }
}

impl From<KeyringError> for Error {
    fn from(err: KeyringError) -> Self {
        match err {
            KeyringError::Signing(e) => Error::Signing(e),
            e => Error::Credential(e.to_string()),
        }
    }
}

/// A named public credential held by a [`Keyring`].
///
/// Clones share the account's send lock, so every holder of a record for the
/// same key serializes on it.
#[derive(Debug, Clone)]
pub struct Record {
    name: String,
    public_key: PublicKey,
    address: AccountId,
    send_lock: Arc<Mutex<()>>,
}

impl Record {
    /// Returns the alias the record is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the account public key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Returns the account address.
    pub fn address(&self) -> &AccountId {
        &self.address
    }

    /// Acquire the per-account send lock.
    ///
    /// Holding it from the sequence fetch until the node has accepted the
    /// transaction keeps concurrent sends from signing with the same sequence.
    pub async fn lock(&self) -> OwnedMutexGuard<()> {
        self.send_lock.clone().lock_owned().await
    }
}

struct Entry {
    record: Record,
    key: SigningKey,
}

/// An in-memory credential store.
pub struct Keyring {
    prefix: String,
    entries: HashMap<String, Entry>,
}

impl fmt::Debug for Keyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyring")
            .field("prefix", &self.prefix)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Keyring {
    /// Returns an empty keyring deriving addresses with the bech32 `prefix`.
    pub fn new_in_memory(prefix: impl Into<String>) -> Self {
        Keyring {
            prefix: prefix.into(),
            entries: HashMap::new(),
        }
    }

    /// Returns the record stored under `uid`.
    pub fn key(&self, uid: &str) -> Result<Record, KeyringError> {
        self.entries
            .get(uid)
            .map(|entry| entry.record.clone())
            .ok_or_else(|| KeyringError::NotFound(uid.to_owned()))
    }

    /// Derive a key from `mnemonic` at `hd_path` and store it under `uid`.
    pub fn new_account(
        &mut self,
        uid: &str,
        mnemonic: &str,
        hd_path: &str,
    ) -> Result<Record, KeyringError> {
        if self.entries.contains_key(uid) {
            return Err(KeyringError::AlreadyExists(uid.to_owned()));
        }
        let key = derive_signing_key(mnemonic, hd_path)?;
        let public_key = key.public_key();
        let address = public_key
            .account_id(&self.prefix)
            .map_err(|e| KeyringError::Derivation(e.to_string()))?;
        let record = Record {
            name: uid.to_owned(),
            public_key,
            address,
            send_lock: Arc::new(Mutex::new(())),
        };
        self.entries.insert(
            uid.to_owned(),
            Entry {
                record: record.clone(),
                key,
            },
        );
        Ok(record)
    }

    /// Remove the record stored under `uid`.
    pub fn delete(&mut self, uid: &str) -> Result<(), KeyringError> {
        self.entries
            .remove(uid)
            .map(|_| ())
            .ok_or_else(|| KeyringError::NotFound(uid.to_owned()))
    }

    /// Returns all stored records.
    pub fn list(&self) -> Vec<Record> {
        let mut records = self
            .entries
            .values()
            .map(|e| e.record.clone())
            .collect::<Vec<_>>();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    /// Sign `sign_doc` with the key stored under `uid`.
    pub fn sign(&self, uid: &str, sign_doc: SignDoc) -> Result<Raw, KeyringError> {
        let entry = self
            .entries
            .get(uid)
            .ok_or_else(|| KeyringError::NotFound(uid.to_owned()))?;
        sign_doc
            .sign(&entry.key)
            .map_err(|e| KeyringError::Signing(e.to_string()))
    }
}
