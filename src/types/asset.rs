use std::collections::BTreeSet;
use std::ops::{Add, Sub};

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{number_or_string, AccountId, AssetId, Extensions};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Marshal, Serialize, Deserialize)]
pub struct AssetAmount {
    #[serde(deserialize_with = "number_or_string")]
    pub amount: i64,
    pub asset_id: AssetId,
}

impl AssetAmount {
    pub fn new(amount: i64, asset_id: AssetId) -> Self {
        AssetAmount { amount, asset_id }
    }

    pub fn checked_add(&self, other: &AssetAmount) -> Result<AssetAmount> {
        self.check_same_asset(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| Error::InvalidData(String::from("asset amount overflow")))?;
        Ok(AssetAmount::new(amount, self.asset_id))
    }

    pub fn checked_sub(&self, other: &AssetAmount) -> Result<AssetAmount> {
        self.check_same_asset(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| Error::InvalidData(String::from("asset amount overflow")))?;
        Ok(AssetAmount::new(amount, self.asset_id))
    }

    fn check_same_asset(&self, other: &AssetAmount) -> Result<()> {
        if self.asset_id != other.asset_id {
            return Err(Error::InvalidData(format!(
                "asset mismatch: {} vs {}",
                self.asset_id, other.asset_id
            )));
        }
        Ok(())
    }
}

// Mixing assets is a programming error, not a recoverable condition; the
// checked_* methods exist for untrusted input.
impl Add for AssetAmount {
    type Output = AssetAmount;

    fn add(self, other: AssetAmount) -> AssetAmount {
        assert_eq!(self.asset_id, other.asset_id, "cannot add different assets");
        AssetAmount::new(self.amount + other.amount, self.asset_id)
    }
}

impl Sub for AssetAmount {
    type Output = AssetAmount;

    fn sub(self, other: AssetAmount) -> AssetAmount {
        assert_eq!(
            self.asset_id, other.asset_id,
            "cannot subtract different assets"
        );
        AssetAmount::new(self.amount - other.amount, self.asset_id)
    }
}

/// The ratio `base / quote` between two assets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct Price {
    pub base: AssetAmount,
    pub quote: AssetAmount,
}

impl Price {
    pub fn new(base: AssetAmount, quote: AssetAmount) -> Self {
        Price { base, quote }
    }

    pub fn invert(&self) -> Price {
        Price::new(self.quote, self.base)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct PriceFeed {
    pub settlement_price: Price,
    pub maintenance_collateral_ratio: u16,
    pub maximum_short_squeeze_ratio: u16,
    pub core_exchange_rate: Price,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetOptions {
    #[serde(deserialize_with = "number_or_string")]
    pub max_supply: i64,
    pub market_fee_percent: u16,
    #[serde(deserialize_with = "number_or_string")]
    pub max_market_fee: i64,
    pub issuer_permissions: u16,
    pub flags: u16,
    pub core_exchange_rate: Price,
    pub whitelist_authorities: BTreeSet<AccountId>,
    pub blacklist_authorities: BTreeSet<AccountId>,
    pub whitelist_markets: BTreeSet<AssetId>,
    pub blacklist_markets: BTreeSet<AssetId>,
    pub description: String,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct BitassetOptions {
    pub feed_lifetime_sec: u32,
    pub minimum_feeds: u8,
    pub force_settlement_delay_sec: u32,
    pub force_settlement_offset_percent: u16,
    pub maximum_force_settlement_volume: u16,
    pub short_backing_asset: AssetId,
    #[serde(default)]
    pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};

    #[test]
    fn asset_amount_codec_test() {
        let fee = AssetAmount::new(1000, AssetId::new(789));
        assert_eq!(
            hex::encode(to_bytes(&fee).unwrap()),
            "e8030000000000009506"
        );
        assert_eq!(
            from_bytes::<AssetAmount>(&to_bytes(&fee).unwrap()).unwrap(),
            fee
        );
    }

    #[test]
    fn asset_amount_json_test() {
        let from_string: AssetAmount =
            serde_json::from_str(r#"{"amount":"1000","asset_id":"1.3.0"}"#).unwrap();
        let from_number: AssetAmount =
            serde_json::from_str(r#"{"amount":1000,"asset_id":"1.3.0"}"#).unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(
            serde_json::to_string(&from_number).unwrap(),
            r#"{"amount":1000,"asset_id":"1.3.0"}"#
        );
    }

    #[test]
    fn asset_amount_arithmetic_test() {
        let a = AssetAmount::new(10, AssetId::new(0));
        let b = AssetAmount::new(4, AssetId::new(0));
        assert_eq!((a + b).amount, 14);
        assert_eq!((a - b).amount, 6);
        assert_eq!(a.checked_add(&b).unwrap().amount, 14);

        let other = AssetAmount::new(1, AssetId::new(1));
        assert!(a.checked_add(&other).is_err());
        assert!(a.checked_sub(&other).is_err());
        let max = AssetAmount::new(i64::MAX, AssetId::new(0));
        assert!(max.checked_add(&b).is_err());
    }

    #[test]
    #[should_panic(expected = "cannot add different assets")]
    fn asset_amount_mismatch_panics_test() {
        let _ = AssetAmount::new(1, AssetId::new(0)) + AssetAmount::new(1, AssetId::new(1));
    }

    #[test]
    fn asset_options_order_test() {
        let options = AssetOptions {
            max_supply: 1,
            market_fee_percent: 2,
            max_market_fee: 3,
            issuer_permissions: 4,
            flags: 5,
            description: String::from("d"),
            ..Default::default()
        };
        let bytes = to_bytes(&options).unwrap();
        assert_eq!(&bytes[0..8], &1i64.to_le_bytes());
        assert_eq!(&bytes[8..10], &2u16.to_le_bytes());
        assert_eq!(&bytes[10..18], &3i64.to_le_bytes());
        assert_eq!(&bytes[18..20], &4u16.to_le_bytes());
        assert_eq!(&bytes[20..22], &5u16.to_le_bytes());
        // price (2 x 9 bytes), four empty sets, "d", empty extensions
        assert_eq!(&bytes[22 + 18..], &[0, 0, 0, 0, 1, b'd', 0]);
    }
}
