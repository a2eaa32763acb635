// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use cosmrs::bank::MsgSend;
use cosmrs::tx::{Fee, Msg};
use cosmrs::{AccountId, Any, Coin, Denom};

use crate::error::{Error, Result};

/// Base denomination of the chain.
pub const BASE_DENOM: &str = "unibi";

/// Units of gas paid for by one unit of the base denomination.
pub const GAS_PER_FEE_UNIT: u64 = 40;

/// Returns the fee amount for a gas limit, rounding down.
pub fn fee_amount(gas_limit: u64, gas_per_fee_unit: u64) -> u128 {
    u128::from(gas_limit / gas_per_fee_unit.max(1))
}

/// Returns the fee for a gas limit paid by `payer`.
pub fn fee(gas_limit: u64, gas_per_fee_unit: u64, denom: &Denom, payer: AccountId) -> Fee {
    Fee {
        amount: vec![Coin {
            denom: denom.clone(),
            amount: fee_amount(gas_limit, gas_per_fee_unit),
        }],
        gas_limit,
        payer: Some(payer),
        granter: None,
    }
}

/// Convenience method to create a packed bank transfer message.
pub fn bank_send(from: &AccountId, to: &AccountId, amount: u128, denom: &Denom) -> Result<Any> {
    MsgSend {
        from_address: from.clone(),
        to_address: to.clone(),
        amount: vec![Coin {
            denom: denom.clone(),
            amount,
        }],
    }
    .to_any()
    .map_err(|e| Error::Encoding(format!("error packing bank send: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denom() -> Denom {
        BASE_DENOM.parse().unwrap()
    }

    fn address() -> AccountId {
        AccountId::new("nibi", &[7u8; 20]).unwrap()
    }

    #[test]
    fn test_fee_amount_rounds_down() {
        assert_eq!(fee_amount(200_000, GAS_PER_FEE_UNIT), 5_000);
        assert_eq!(fee_amount(200_039, GAS_PER_FEE_UNIT), 5_000);
        assert_eq!(fee_amount(39, GAS_PER_FEE_UNIT), 0);
        assert_eq!(fee_amount(800_000, GAS_PER_FEE_UNIT), 20_000);
    }

    #[test]
    fn test_fee() {
        let fee = fee(400_000, GAS_PER_FEE_UNIT, &denom(), address());
        assert_eq!(fee.gas_limit, 400_000);
        assert_eq!(fee.amount.len(), 1);
        assert_eq!(fee.amount[0].amount, 10_000);
        assert_eq!(fee.amount[0].denom.as_ref(), BASE_DENOM);
        assert_eq!(fee.payer, Some(address()));
        assert!(fee.granter.is_none());
    }

    #[test]
    fn test_bank_send() {
        let to = AccountId::new("nibi", &[9u8; 20]).unwrap();
        let any = bank_send(&address(), &to, 1_000_000, &denom()).unwrap();
        assert_eq!(any.type_url, "/cosmos.bank.v1beta1.MsgSend");

        let msg = MsgSend::from_any(&any).unwrap();
        assert_eq!(msg.to_address, to);
        assert_eq!(msg.amount[0].amount, 1_000_000);
    }
}
