// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Nibi Signer
//!
//! A mnemonic keyring and transaction signer for Nibiru.

pub mod key;
mod keyring;

pub use keyring::{Keyring, KeyringError, Record};
