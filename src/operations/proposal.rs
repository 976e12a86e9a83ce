use std::collections::BTreeSet;

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::operations::Operation;
use crate::types::{AccountId, AssetAmount, Extensions, ProposalId, PublicKey, TimePointSec};

/// A proposed operation, held in its own record so the proposal can grow
/// metadata without changing the operation encoding.
#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct OpWrapper {
    pub op: Operation,
}

impl From<Operation> for OpWrapper {
    fn from(op: Operation) -> Self {
        OpWrapper { op }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct ProposalCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub expiration_time: TimePointSec,
    pub proposed_ops: Vec<OpWrapper>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_period_seconds: Option<u32>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl ProposalCreateOperation {
    pub fn add_operation<T: Into<Operation>>(&mut self, op: T) {
        self.proposed_ops.push(OpWrapper { op: op.into() });
    }
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct ProposalUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub proposal: ProposalId,
    pub active_approvals_to_add: BTreeSet<AccountId>,
    pub active_approvals_to_remove: BTreeSet<AccountId>,
    pub owner_approvals_to_add: BTreeSet<AccountId>,
    pub owner_approvals_to_remove: BTreeSet<AccountId>,
    pub key_approvals_to_add: BTreeSet<PublicKey>,
    pub key_approvals_to_remove: BTreeSet<PublicKey>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct ProposalDeleteOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub using_owner_authority: bool,
    pub proposal: ProposalId,
    #[serde(default)]
    pub extensions: Extensions,
}
