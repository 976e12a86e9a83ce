use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, AssetAmount, Extensions, Memo};

/// Moves `amount` from one account to another, optionally with a memo.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct TransferOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl TransferOperation {
    pub fn new(from: AccountId, to: AccountId, amount: AssetAmount) -> Self {
        TransferOperation {
            from,
            to,
            amount,
            ..Default::default()
        }
    }
}

/// An issuer-forced transfer of an asset with the override flag set.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct OverrideTransferOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
    #[serde(default)]
    pub extensions: Extensions,
}
