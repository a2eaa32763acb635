// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use bip32::DerivationPath;
use bip39::{Language, Mnemonic, MnemonicType, Seed};
use cosmrs::crypto::secp256k1::SigningKey;
use rand::{rngs::OsRng, RngCore};

use crate::keyring::KeyringError;

/// Standard Cosmos HD path (coin type 118, first account, first address).
pub const FULL_FUNDRAISER_PATH: &str = "m/44'/118'/0'/0/0";

/// Derive a secp256k1 signing key from a BIP-39 mnemonic at `hd_path`.
///
/// Phrases of 12 to 24 words are accepted and whitespace between words is
/// normalized. No BIP-39 passphrase is used.
pub fn derive_signing_key(mnemonic: &str, hd_path: &str) -> Result<SigningKey, KeyringError> {
    let phrase = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
    let mnemonic = Mnemonic::from_phrase(&phrase, Language::English)
        .map_err(|e| KeyringError::InvalidMnemonic(e.to_string()))?;
    let path = hd_path
        .parse::<DerivationPath>()
        .map_err(|e| KeyringError::Derivation(format!("invalid hd path '{hd_path}': {e}")))?;
    let seed = Seed::new(&mnemonic, "");
    SigningKey::derive_from_path(seed.as_bytes(), &path)
        .map_err(|e| KeyringError::Derivation(e.to_string()))
}

/// Generate a new random 24-word mnemonic.
pub fn random_mnemonic() -> String {
    let mut entropy = vec![0u8; MnemonicType::Words24.entropy_bits() / 8];
    OsRng.fill_bytes(&mut entropy);
    Mnemonic::from_entropy(&entropy, Language::English)
        .expect("256 bits is a valid entropy length")
        .into_phrase()
}
