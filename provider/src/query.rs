// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use async_trait::async_trait;
use cosmrs::proto::cosmos::auth::v1beta1::{BaseAccount, ModuleAccount};
use cosmrs::proto::cosmos::vesting::v1beta1::{
    BaseVestingAccount, ContinuousVestingAccount, DelayedVestingAccount, PeriodicVestingAccount,
    PermanentLockedAccount,
};
use cosmrs::AccountId;
use prost::Message;
use serde::Serialize;

use crate::error::{Error, Result};

const BASE_ACCOUNT: &str = "/cosmos.auth.v1beta1.BaseAccount";
const MODULE_ACCOUNT: &str = "/cosmos.auth.v1beta1.ModuleAccount";
const CONTINUOUS_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
const DELAYED_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";
const PERIODIC_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.PeriodicVestingAccount";
const PERMANENT_LOCKED_ACCOUNT: &str = "/cosmos.vesting.v1beta1.PermanentLockedAccount";

/// On-chain numbers needed to sign a transaction for an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountNumbers {
    /// Number assigned by the chain when the account was created.
    pub account_number: u64,
    /// Current sequence (nonce).
    pub sequence: u64,
}

impl From<&BaseAccount> for AccountNumbers {
    fn from(acc: &BaseAccount) -> Self {
        AccountNumbers {
            account_number: acc.account_number,
            sequence: acc.sequence,
        }
    }
}

/// Provider for read-only queries.
#[async_trait]
pub trait QueryProvider: Send + Sync {
    /// Returns the current account number and sequence for an address.
    async fn account_numbers(&self, address: &AccountId) -> Result<AccountNumbers>;
}

/// Chain-specific account types embed the base account as field 1.
#[derive(Clone, PartialEq, Message)]
struct WrappedAccount {
    #[prost(message, optional, tag = "1")]
    base_account: Option<BaseAccount>,
}

/// Unpack the polymorphic account returned by the auth module.
///
/// Unknown account types are decoded as a wrapper around a base account.
pub fn unpack_account(type_url: &str, value: &[u8]) -> Result<AccountNumbers> {
    let base = match type_url {
        BASE_ACCOUNT => Some(decode::<BaseAccount>(type_url, value)?),
        MODULE_ACCOUNT => decode::<ModuleAccount>(type_url, value)?.base_account,
        CONTINUOUS_VESTING_ACCOUNT => {
            vesting_base(decode::<ContinuousVestingAccount>(type_url, value)?.base_vesting_account)
        }
        DELAYED_VESTING_ACCOUNT => {
            vesting_base(decode::<DelayedVestingAccount>(type_url, value)?.base_vesting_account)
        }
        PERIODIC_VESTING_ACCOUNT => {
            vesting_base(decode::<PeriodicVestingAccount>(type_url, value)?.base_vesting_account)
        }
        PERMANENT_LOCKED_ACCOUNT => {
            vesting_base(decode::<PermanentLockedAccount>(type_url, value)?.base_vesting_account)
        }
        _ => {
            tracing::debug!(type_url, "Unpacking unknown account type as a wrapped base account");
            decode::<WrappedAccount>(type_url, value)?.base_account
        }
    };
    base.as_ref()
        .map(AccountNumbers::from)
        .ok_or_else(|| Error::AccountQuery(format!("account of type '{type_url}' has no base account")))
}

fn vesting_base(vesting: Option<BaseVestingAccount>) -> Option<BaseAccount> {
    vesting.and_then(|v| v.base_account)
}

fn decode<M: Message + Default>(type_url: &str, value: &[u8]) -> Result<M> {
    M::decode(value).map_err(|e| Error::AccountQuery(format!("error unpacking '{type_url}': {e}")))
}
