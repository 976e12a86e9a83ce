use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, AssetAmount, Memo, TimePointSec, WithdrawPermissionId};

/// Lets `authorized_account` pull up to `withdrawal_limit` per period.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WithdrawPermissionCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub withdrawal_limit: AssetAmount,
    pub withdrawal_period_sec: u32,
    pub periods_until_expiration: u32,
    pub period_start_time: TimePointSec,
}

// Same fields as create, but the last two are swapped on the wire.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WithdrawPermissionUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub permission_to_update: WithdrawPermissionId,
    pub withdrawal_limit: AssetAmount,
    pub withdrawal_period_sec: u32,
    pub period_start_time: TimePointSec,
    pub periods_until_expiration: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WithdrawPermissionClaimOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub withdraw_permission: WithdrawPermissionId,
    pub withdraw_from_account: AccountId,
    pub withdraw_to_account: AccountId,
    pub amount_to_withdraw: AssetAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WithdrawPermissionDeleteOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub withdrawal_permission: WithdrawPermissionId,
}
