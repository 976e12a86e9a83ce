use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    number_or_string, AccountId, AssetAmount, TimePointSec, VestingBalanceId,
    VestingPolicyInitializer, WorkerInitializer,
};

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct VestingBalanceCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub creator: AccountId,
    pub owner: AccountId,
    pub amount: AssetAmount,
    pub policy: VestingPolicyInitializer,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct VestingBalanceWithdrawOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub vesting_balance: VestingBalanceId,
    pub owner: AccountId,
    pub amount: AssetAmount,
}

/// Proposes a worker paid `daily_pay` core units between the two dates.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WorkerCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub owner: AccountId,
    pub work_begin_date: TimePointSec,
    pub work_end_date: TimePointSec,
    #[serde(deserialize_with = "number_or_string")]
    pub daily_pay: i64,
    pub name: String,
    pub url: String,
    pub initializer: WorkerInitializer,
}
