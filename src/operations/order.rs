use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AccountId, AssetAmount, CallOrderUpdateExtensions, Extensions, GrapheneId, LimitOrderId,
    Price, TimePointSec,
};

/// Offers `amount_to_sell` for at least `min_to_receive` until `expiration`.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub seller: AccountId,
    pub amount_to_sell: AssetAmount,
    pub min_to_receive: AssetAmount,
    pub expiration: TimePointSec,
    pub fill_or_kill: bool,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub order: LimitOrderId,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Adjusts the collateral and debt of a margin position.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct CallOrderUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub funding_account: AccountId,
    pub delta_collateral: AssetAmount,
    pub delta_debt: AssetAmount,
    #[serde(default)]
    pub extensions: CallOrderUpdateExtensions,
}

/// Virtual operation recording one side of a match.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct FillOrderOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub order_id: GrapheneId,
    pub account_id: AccountId,
    pub pays: AssetAmount,
    pub receives: AssetAmount,
    pub fill_price: Price,
    pub is_maker: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct BidCollateralOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub bidder: AccountId,
    pub additional_collateral: AssetAmount,
    pub debt_covered: AssetAmount,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Virtual operation recording an accepted collateral bid.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct ExecuteBidOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub bidder: AccountId,
    pub debt: AssetAmount,
    pub collateral: AssetAmount,
}
