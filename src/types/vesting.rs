use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::TimePointSec;

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct LinearVestingPolicyInitializer {
    pub begin_timestamp: TimePointSec,
    pub vesting_cliff_seconds: u32,
    pub vesting_duration_seconds: u32,
}

/// Coin-days-destroyed vesting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct CddVestingPolicyInitializer {
    pub start_claim: TimePointSec,
    pub vesting_seconds: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct InstantVestingPolicyInitializer {}

static_variant! {
    pub enum VestingPolicyInitializer {
        0 => Linear(LinearVestingPolicyInitializer),
        1 => Cdd(CddVestingPolicyInitializer),
        2 => Instant(InstantVestingPolicyInitializer),
    }
}

impl Default for VestingPolicyInitializer {
    fn default() -> Self {
        VestingPolicyInitializer::Linear(LinearVestingPolicyInitializer::default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct RefundWorkerInitializer {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct VestingBalanceWorkerInitializer {
    pub pay_vesting_period_days: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct BurnWorkerInitializer {}

static_variant! {
    pub enum WorkerInitializer {
        0 => Refund(RefundWorkerInitializer),
        1 => VestingBalance(VestingBalanceWorkerInitializer),
        2 => Burn(BurnWorkerInitializer),
    }
}

impl Default for WorkerInitializer {
    fn default() -> Self {
        WorkerInitializer::Refund(RefundWorkerInitializer {})
    }
}
