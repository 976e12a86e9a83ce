use std::collections::BTreeSet;

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    number_or_string, AccountId, AssetAmount, AssetId, AssetOptions, BitassetOptions,
    Extensions, ForceSettlementId, Memo, Price, PriceFeed,
};

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub symbol: String,
    pub precision: u8,
    pub common_options: AssetOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitasset_opts: Option<BitassetOptions>,
    pub is_prediction_market: bool,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_issuer: Option<AccountId>,
    pub new_options: AssetOptions,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetUpdateBitassetOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_options: BitassetOptions,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetUpdateFeedProducersOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_feed_producers: BTreeSet<AccountId>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetIssueOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetReserveOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub amount_to_reserve: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Adds core asset to an asset's fee pool. `amount` is in core units.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetFundFeePoolOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub from_account: AccountId,
    pub asset_id: AssetId,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: i64,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetSettleOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub account: AccountId,
    pub amount: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetGlobalSettleOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_settle: AssetId,
    pub settle_price: Price,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetPublishFeedOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub publisher: AccountId,
    pub asset_id: AssetId,
    pub feed: PriceFeed,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Virtual operation recording a cancelled force settlement.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetSettleCancelOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub settlement: ForceSettlementId,
    pub account: AccountId,
    pub amount: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetClaimFeesOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub amount_to_claim: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetClaimPoolOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_id: AssetId,
    pub amount_to_claim: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssetUpdateIssuerOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_issuer: AccountId,
    #[serde(default)]
    pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use crate::operations::Operation;

    #[test]
    fn asset_create_test() {
        let mut op = AssetCreateOperation {
            issuer: AccountId::new(12),
            symbol: String::from("GOLD"),
            precision: 4,
            ..Default::default()
        };
        let plain = to_bytes(&op).unwrap();
        assert_eq!(&plain[9..16], &[12, 4, b'G', b'O', b'L', b'D', 4]);
        assert_eq!(&plain[plain.len() - 3..], &[0, 0, 0]);

        op.bitasset_opts = Some(BitassetOptions {
            short_backing_asset: AssetId::new(0),
            minimum_feeds: 7,
            ..Default::default()
        });
        let extended = Operation::from(op.clone());
        let bytes = to_bytes(&extended).unwrap();
        assert_eq!(bytes.len(), plain.len() + 1 + 4 + 1 + 4 + 2 + 2 + 1 + 1);
        assert_eq!(from_bytes::<Operation>(&bytes).unwrap(), extended);
    }

    #[test]
    fn asset_update_new_issuer_test() {
        let op = AssetUpdateOperation {
            issuer: AccountId::new(1),
            asset_to_update: AssetId::new(2),
            new_issuer: Some(AccountId::new(3)),
            ..Default::default()
        };
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(&bytes[9..13], &[1, 2, 1, 3]);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["new_issuer"], "1.2.3");
        assert_eq!(serde_json::from_value::<AssetUpdateOperation>(json).unwrap(), op);
    }

    #[test]
    fn fund_fee_pool_string_amount_test() {
        let op: AssetFundFeePoolOperation = serde_json::from_str(
            r#"{"from_account":"1.2.1","asset_id":"1.3.4","amount":"500000","extensions":[]}"#,
        )
        .unwrap();
        assert_eq!(op.amount, 500000);
        assert_eq!(&to_bytes(&op).unwrap()[9..11], &[1, 4]);
    }

    #[test]
    fn feed_producers_order_test() {
        let op = AssetUpdateFeedProducersOperation {
            new_feed_producers: [9u64, 3, 5].iter().map(|i| AccountId::new(*i)).collect(),
            ..Default::default()
        };
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(&bytes[11..15], &[3, 3, 5, 9]);
    }
}
